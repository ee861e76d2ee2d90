// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use purge_cli_config::{LogFormat, LogLevel, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events pass the configured level; everything else is `warn`.
const OWN_CRATES: [&str; 4] = [
	"purge_users",
	"purge_directory",
	"purge_cli_config",
	"purge_common_http",
];

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

fn default_directives(level: LogLevel) -> String {
	let level = log_level_to_tracing(level);
	let mut directives = String::from("warn");
	for krate in OWN_CRATES {
		directives.push_str(&format!(",{krate}={level}"));
	}
	directives
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr; stdout carries the report.
pub fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directives(logging.level)));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn directives_cover_own_crates() {
		let directives = default_directives(LogLevel::Debug);
		assert!(directives.starts_with("warn,"));
		assert!(directives.contains("purge_directory=DEBUG"));
		assert!(EnvFilter::try_new(&directives).is_ok());
	}
}
