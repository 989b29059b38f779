use std::fs::File;
use std::os::fd::OwnedFd;
use std::process::{Child, ExitStatus, Stdio};

use nix::fcntl::OFlag;
use nix::unistd;
use thiserror::Error;
use tracing::{debug, warn};

use crate::job::JobRegistry;
use crate::launch::{self, LaunchError};
use crate::redirect::{self, RedirectError};
use crate::types::Pipeline;

#[derive(Debug, Error)]
pub enum ExecError {
	#[error(transparent)]
	Redirect(#[from] RedirectError),
	#[error("failed to create pipe: {0}")]
	Pipe(#[source] nix::Error),
	#[error(transparent)]
	Launch(#[from] LaunchError),
}

/// How an `execute` call concluded.
#[derive(Debug)]
pub enum Outcome {
	/// Foreground pipeline: every stage was collected; `status` is the
	/// last stage's exit status.
	Completed { status: Option<ExitStatus> },
	/// Background pipeline: every stage was handed to the registry.
	Detached { pids: Vec<u32> },
}

/// Run a parsed pipeline to completion (foreground) or to registration
/// (background).
///
/// Redirection endpoints are resolved up front, so an unopenable file
/// aborts the invocation before any process exists. Stages are spawned
/// left to right with a fresh pipe between each adjacent pair; each pipe
/// end lives exactly as long as the one launch that needs it. If a stage
/// fails to launch, no further stages are attempted, but the stages
/// already running are still waited on or registered, never abandoned.
pub fn execute(pipeline: &Pipeline, jobs: &mut JobRegistry) -> Result<Outcome, ExecError> {
	let input = pipeline.input.as_deref().map(redirect::resolve_input).transpose()?;
	let output = pipeline.output.as_deref().map(redirect::resolve_output).transpose()?;

	let (launched, failure) = spawn_stages(pipeline, input, output);

	let outcome = if pipeline.background {
		let pids = launched
			.into_iter()
			.map(|(child, label)| jobs.register(child, &label))
			.collect();
		Outcome::Detached { pids }
	} else {
		Outcome::Completed { status: wait_all(launched) }
	};

	match failure {
		Some(e) => Err(e),
		None => Ok(outcome),
	}
}

/// Spawn the stages in order. Returns the children launched so far
/// (always, even on failure, so the caller can collect them) together
/// with the first error encountered, if any.
fn spawn_stages(
	pipeline: &Pipeline,
	mut input: Option<File>,
	mut output: Option<File>,
) -> (Vec<(Child, String)>, Option<ExecError>) {
	let n = pipeline.stages.len();
	let mut launched: Vec<(Child, String)> = Vec::with_capacity(n);
	// read end of the pipe written by the previous stage
	let mut carried: Option<OwnedFd> = None;

	for (i, argv) in pipeline.stages.iter().enumerate() {
		let stdin = match carried.take() {
			Some(fd) => Stdio::from(fd),
			None => match input.take() {
				Some(file) => Stdio::from(file),
				None => Stdio::inherit(),
			},
		};
		let stdout = if i + 1 < n {
			match unistd::pipe2(OFlag::O_CLOEXEC) {
				Ok((read_end, write_end)) => {
					carried = Some(read_end);
					Stdio::from(write_end)
				},
				Err(e) => return (launched, Some(ExecError::Pipe(e))),
			}
		} else {
			match output.take() {
				Some(file) => Stdio::from(file),
				None => Stdio::inherit(),
			}
		};

		// launch consumes both endpoints; the parent's copies are closed
		// by the time it returns, whether or not the spawn succeeded
		match launch::launch(argv, stdin, stdout) {
			Ok(child) => {
				let label = argv.first().cloned().unwrap_or_default();
				launched.push((child, label));
			},
			Err(e) => return (launched, Some(e.into())),
		}
	}
	(launched, None)
}

/// Collect every launched stage. All must be collected even if one wait
/// fails, or the uncollected children would linger as zombies.
fn wait_all(launched: Vec<(Child, String)>) -> Option<ExitStatus> {
	let mut last = None;
	for (mut child, label) in launched {
		match child.wait() {
			Ok(status) => {
				debug!(command = %label, code = ?status.code(), "stage exited");
				last = Some(status);
			},
			Err(e) => warn!(command = %label, error = %e, "failed to collect stage"),
		}
	}
	last
}
