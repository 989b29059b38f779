//! `msh`: a small interactive shell.
//!
//! The library exposes the execution engine — pipeline spawning with
//! descriptor plumbing, whole-pipeline redirection, and a registry of
//! detached (background) stages — plus the line parser that feeds it.
//! The binary in `main.rs` wraps it in a prompt loop.

pub mod builtin;
pub mod cli;
pub mod exec;
pub mod job;
pub mod launch;
pub mod logging;
pub mod parser;
pub mod redirect;
pub mod types;

pub use exec::{execute, ExecError, Outcome};
pub use job::{list_jobs, reap_and_report, JobRegistry};
pub use parser::{parse, ParseError};
pub use types::Pipeline;
