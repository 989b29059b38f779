use std::path::PathBuf;

/// A parsed command line: one or more stages connected by pipes,
/// optional whole-pipeline redirection endpoints, and a background flag.
///
/// `stages` is never empty and every stage holds at least the executable
/// name at index 0; the parser rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
	pub stages: Vec<Vec<String>>,
	pub input: Option<PathBuf>,
	pub output: Option<PathBuf>,
	pub background: bool,
}

impl Pipeline {
	pub fn new(stages: Vec<Vec<String>>) -> Pipeline {
		Pipeline { stages, input: None, output: None, background: false }
	}
}
