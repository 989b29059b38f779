//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Level priority: `--log-level` flag, then the `MSH_LOG` environment
//! variable, then `warn`. The shell's own output goes to stdout/stderr
//! directly; tracing is diagnostics only.

use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global subscriber. Call once at startup.
pub fn init(cli_level: Option<LogLevel>) {
	let level = match cli_level {
		Some(lvl) => level_from_log_level(lvl),
		None => std::env::var("MSH_LOG")
			.ok()
			.and_then(|s| parse_level_str(&s))
			.unwrap_or(tracing::Level::WARN),
	};

	fmt().with_max_level(level).with_target(true).init();
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
	match lvl {
		LogLevel::Error => tracing::Level::ERROR,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Trace => tracing::Level::TRACE,
	}
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
	match s.trim().to_lowercase().as_str() {
		"error" => Some(tracing::Level::ERROR),
		"warn" | "warning" => Some(tracing::Level::WARN),
		"info" => Some(tracing::Level::INFO),
		"debug" => Some(tracing::Level::DEBUG),
		"trace" => Some(tracing::Level::TRACE),
		_ => None,
	}
}
