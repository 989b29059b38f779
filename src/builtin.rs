/// Commands handled by the interactive loop itself, before the executor
/// is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
	Exit,
	Jobs,
}

pub fn match_builtin(name: &str) -> Option<Builtin> {
	match name {
		"exit" => Some(Builtin::Exit),
		"jobs" => Some(Builtin::Jobs),
		_ => None,
	}
}
