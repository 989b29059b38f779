use std::io::{self, BufRead, Write};

use msh::builtin::{self, Builtin};
use msh::exec::{self, Outcome};
use msh::job::{self, JobRegistry};
use msh::{cli, logging, parser};

const PROMPT: &str = "msh> ";

fn main() {
	let args = cli::parse();
	logging::init(args.log_level);

	if let Some(line) = args.command {
		// -c: one command line through the same path as the prompt loop
		let mut jobs = JobRegistry::new();
		let ok = run_line(&line, &mut jobs, &mut io::stdout());
		std::process::exit(if ok { 0 } else { 1 });
	}

	repl();
}

fn repl() {
	let mut jobs = JobRegistry::new();
	let stdin = io::stdin();
	let mut stdin = stdin.lock();
	let mut stdout = io::stdout();

	loop {
		// report background stages that finished since the last prompt
		let _ = job::reap_and_report(&mut jobs, &mut stdout);

		let _ = stdout.write_all(PROMPT.as_bytes());
		let _ = stdout.flush();

		let mut line = String::new();
		match stdin.read_line(&mut line) {
			Ok(0) | Err(_) => break,
			Ok(_) => {},
		}
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		match line.split_whitespace().next().and_then(builtin::match_builtin) {
			Some(Builtin::Exit) => break,
			Some(Builtin::Jobs) => {
				let _ = job::list_jobs(&jobs, &mut stdout);
			},
			None => {
				run_line(line, &mut jobs, &mut stdout);
			},
		}
	}
	println!("bye");
}

/// Parse and execute one command line. Errors are reported and absorbed;
/// nothing here ends the shell. Returns whether the line succeeded.
fn run_line<W: Write>(line: &str, jobs: &mut JobRegistry, out: &mut W) -> bool {
	let pipeline = match parser::parse(line) {
		Ok(p) => p,
		Err(e) => {
			eprintln!("error: {}", e);
			return false;
		},
	};
	match exec::execute(&pipeline, jobs) {
		Ok(Outcome::Completed { status }) => status.is_some_and(|s| s.success()),
		Ok(Outcome::Detached { pids }) => {
			for pid in pids {
				let _ = writeln!(out, "pid: {} is running in the background", pid);
			}
			true
		},
		Err(e) => {
			eprintln!("msh: {}", e);
			false
		},
	}
}
