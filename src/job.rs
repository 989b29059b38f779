use std::fmt;
use std::io::{self, Write};
use std::process::{Child, ExitStatus};

use tracing::{debug, warn};

/// One detached pipeline stage under supervision. The registry owns the
/// OS child handle; the label is the stage's executable name, captured
/// at registration time.
#[derive(Debug)]
struct JobEntry {
	child: Child,
	label: String,
}

/// A detached stage observed to have terminated by `reap_finished`.
/// Reported exactly once, then forgotten.
#[derive(Debug)]
pub struct FinishedJob {
	pub pid: u32,
	pub label: String,
	pub status: ExitStatus,
}

impl fmt::Display for FinishedJob {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "PID: {}, Command: {}, (finished)", self.pid, self.label)
	}
}

/// A detached stage still running at the time of a `running` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningJob {
	pub pid: u32,
	pub label: String,
}

impl fmt::Display for RunningJob {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "PID: {}, Command: {}, (running)", self.pid, self.label)
	}
}

/// Order-preserving registry of detached stages, keyed by pid.
/// Purely advisory bookkeeping: it reports on the tracked processes
/// but does not constrain them. In-memory only.
#[derive(Debug, Default)]
pub struct JobRegistry {
	entries: Vec<JobEntry>,
}

impl JobRegistry {
	pub fn new() -> JobRegistry {
		JobRegistry { entries: vec![] }
	}

	/// Take ownership of a detached stage's child handle. Returns its pid.
	pub fn register(&mut self, child: Child, label: &str) -> u32 {
		let pid = child.id();
		debug!(pid, command = label, "background stage registered");
		self.entries.push(JobEntry { child, label: label.to_owned() });
		pid
	}

	/// Poll every tracked stage without blocking; remove and return the
	/// ones that have terminated since the last call. Still-running
	/// entries are left untouched. An empty result is the normal case.
	pub fn reap_finished(&mut self) -> Vec<FinishedJob> {
		let mut finished = vec![];
		self.entries.retain_mut(|entry| match entry.child.try_wait() {
			Ok(Some(status)) => {
				finished.push(FinishedJob {
					pid: entry.child.id(),
					label: std::mem::take(&mut entry.label),
					status,
				});
				false
			},
			Ok(None) => true,
			Err(e) => {
				// keep the entry; a later poll may still collect it
				warn!(pid = entry.child.id(), error = %e, "failed to poll background stage");
				true
			},
		});
		finished
	}

	/// Snapshot of the still-tracked stages. Pure read, no reaping.
	pub fn running(&self) -> Vec<RunningJob> {
		self.entries
			.iter()
			.map(|entry| RunningJob { pid: entry.child.id(), label: entry.label.clone() })
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}

/// Reap newly finished background stages and write one report line per
/// stage. Called by the interactive loop before each prompt.
pub fn reap_and_report<W: Write>(registry: &mut JobRegistry, out: &mut W) -> io::Result<()> {
	for job in registry.reap_finished() {
		writeln!(out, "{}", job)?;
	}
	Ok(())
}

/// Write one report line per still-running background stage.
pub fn list_jobs<W: Write>(registry: &JobRegistry, out: &mut W) -> io::Result<()> {
	for job in registry.running() {
		writeln!(out, "{}", job)?;
	}
	Ok(())
}
