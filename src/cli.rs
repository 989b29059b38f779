use clap::{Parser, ValueEnum};

/// Command-line arguments for `msh`.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "msh",
	version,
	about = "A small interactive shell: pipelines, redirection, background jobs."
)]
pub struct CliArgs {
	/// Run a single command line and exit instead of starting the prompt.
	#[arg(short = 'c', value_name = "COMMAND")]
	pub command: Option<String>,

	/// Logging level (error, warn, info, debug, trace).
	///
	/// If omitted, `MSH_LOG` or a default level is used.
	#[arg(long, value_enum, value_name = "LEVEL")]
	pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

pub fn parse() -> CliArgs {
	CliArgs::parse()
}
