use std::io;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LaunchError {
	#[error("command not found: {0}")]
	NotFound(String),
	#[error("permission denied: {0}")]
	PermissionDenied(String),
	#[error("failed to start {name}: {source}")]
	Spawn {
		name: String,
		#[source]
		source: io::Error,
	},
}

/// Start one child process running `argv` with the given stdio endpoints.
///
/// `argv[0]` is resolved through the OS search path. The descriptors
/// backing `stdin`/`stdout` are duplicated onto the child's standard
/// streams during spawn and the parent's copies are released when this
/// function returns, so the caller never has to close them.
///
/// An exec failure inside the child (missing or non-executable program)
/// is reported back through the spawn error, never as a fake successful
/// exit, so `NotFound`/`PermissionDenied` are distinct outcomes here.
pub fn launch(argv: &[String], stdin: Stdio, stdout: Stdio) -> Result<Child, LaunchError> {
	let name = argv.first().map(String::as_str).unwrap_or_default();
	let mut cmd = Command::new(name);
	cmd.args(argv.iter().skip(1)).stdin(stdin).stdout(stdout);

	match cmd.spawn() {
		Ok(child) => {
			debug!(pid = child.id(), command = name, "stage launched");
			Ok(child)
		},
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			Err(LaunchError::NotFound(name.to_owned()))
		},
		Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
			Err(LaunchError::PermissionDenied(name.to_owned()))
		},
		Err(source) => Err(LaunchError::Spawn { name: name.to_owned(), source }),
	}
}
