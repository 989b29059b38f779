use std::collections::HashSet;
use std::time::{Duration, Instant};

use msh::exec::Outcome;
use msh::{execute, JobRegistry, Pipeline};

fn detached(stages: &[&[&str]]) -> Pipeline {
	let mut p = Pipeline::new(
		stages.iter().map(|s| s.iter().map(|w| w.to_string()).collect()).collect(),
	);
	p.background = true;
	p
}

fn reap_until_empty(jobs: &mut JobRegistry) -> Vec<u32> {
	let deadline = Instant::now() + Duration::from_secs(10);
	let mut reaped = vec![];
	while !jobs.is_empty() {
		assert!(Instant::now() < deadline, "background stages never finished");
		reaped.extend(jobs.reap_finished().into_iter().map(|j| j.pid));
		std::thread::sleep(Duration::from_millis(20));
	}
	reaped
}

#[test]
fn detached_pipeline_registers_every_stage() {
	let mut jobs = JobRegistry::new();
	let outcome =
		execute(&detached(&[&["sleep", "0.3"], &["sleep", "0.3"], &["sleep", "0.3"]]), &mut jobs)
			.unwrap();

	let pids = match outcome {
		Outcome::Detached { pids } => pids,
		other => panic!("expected Detached, got {:?}", other),
	};
	assert_eq!(pids.len(), 3);

	// one running entry per stage, same pids, until they finish
	let running: HashSet<u32> = jobs.running().into_iter().map(|j| j.pid).collect();
	assert_eq!(running, pids.iter().copied().collect());

	let reaped = reap_until_empty(&mut jobs);
	assert_eq!(reaped.len(), 3, "each stage reported exactly once");
	assert_eq!(
		reaped.iter().copied().collect::<HashSet<u32>>(),
		pids.into_iter().collect()
	);

	// nothing left to report
	assert!(jobs.reap_finished().is_empty());
	assert!(jobs.running().is_empty());
}

#[test]
fn execute_does_not_block_on_detached_pipelines() {
	let mut jobs = JobRegistry::new();
	let started = Instant::now();
	execute(&detached(&[&["sleep", "2"]]), &mut jobs).unwrap();
	assert!(started.elapsed() < Duration::from_secs(1));
	assert_eq!(jobs.len(), 1);

	reap_until_empty(&mut jobs);
}

#[test]
fn reap_is_bounded_while_jobs_are_still_running() {
	let mut jobs = JobRegistry::new();
	execute(&detached(&[&["sleep", "1"], &["sleep", "1"], &["sleep", "1"]]), &mut jobs).unwrap();

	let started = Instant::now();
	let finished = jobs.reap_finished();
	assert!(started.elapsed() < Duration::from_millis(500));
	assert!(finished.is_empty());
	assert_eq!(jobs.len(), 3);

	reap_until_empty(&mut jobs);
}

#[test]
fn detached_and_foreground_pipelines_are_independent() {
	let mut jobs = JobRegistry::new();
	execute(&detached(&[&["sleep", "0.5"]]), &mut jobs).unwrap();

	// a foreground run in between neither reaps nor disturbs the registry
	let fg = Pipeline::new(vec![vec!["true".to_string()]]);
	execute(&fg, &mut jobs).unwrap();
	assert_eq!(jobs.len(), 1);

	assert_eq!(reap_until_empty(&mut jobs).len(), 1);
}
