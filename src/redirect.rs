use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedirectError {
	#[error("cannot redirect input from {path}: {source}")]
	Input {
		path: String,
		#[source]
		source: io::Error,
	},
	#[error("cannot redirect output to {path}: {source}")]
	Output {
		path: String,
		#[source]
		source: io::Error,
	},
}

const OUTPUT_MODE: u32 = 0o664;

/// Open `path` read-only for use as a pipeline's stdin.
/// The returned `File` is the caller's to hand off or drop.
pub fn resolve_input(path: &Path) -> Result<File, RedirectError> {
	File::open(path).map_err(|source| RedirectError::Input {
		path: path.display().to_string(),
		source,
	})
}

/// Open `path` for writing (created if absent, truncated if present,
/// mode 0664) for use as a pipeline's stdout.
pub fn resolve_output(path: &Path) -> Result<File, RedirectError> {
	OpenOptions::new()
		.write(true)
		.create(true)
		.truncate(true)
		.mode(OUTPUT_MODE)
		.open(path)
		.map_err(|source| RedirectError::Output {
			path: path.display().to_string(),
			source,
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{Read, Write};

	#[test]
	fn input_missing_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = resolve_input(&dir.path().join("nope")).unwrap_err();
		assert!(matches!(err, RedirectError::Input { .. }));
	}

	#[test]
	fn output_truncates_existing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out");
		std::fs::write(&path, "old contents").unwrap();

		let mut f = resolve_output(&path).unwrap();
		f.write_all(b"new").unwrap();
		drop(f);

		let mut s = String::new();
		resolve_input(&path).unwrap().read_to_string(&mut s).unwrap();
		assert_eq!(s, "new");
	}

	#[test]
	fn output_to_bad_path_is_an_error() {
		let err = resolve_output(Path::new("/nonexistent-dir/out")).unwrap_err();
		assert!(matches!(err, RedirectError::Output { .. }));
	}
}
