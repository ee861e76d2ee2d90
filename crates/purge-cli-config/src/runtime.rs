// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fully resolved runtime configuration.

use std::time::Duration;

use purge_directory::client::{DEFAULT_DELETE_PATH, DEFAULT_SEARCH_PATH};
use purge_directory::executor::DEFAULT_CONCURRENCY;
use purge_directory::resolver::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::layer::{ConfigLayer, HttpLayer, LoggingLayer};
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = purge_common_http::DEFAULT_TIMEOUT.as_secs();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeConfig {
	pub logging: LoggingConfig,
	pub http: HttpConfig,
	pub search: SearchConfig,
	pub delete: DeleteConfig,
	pub paths: PathsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
	Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
	pub timeout: Duration,
	pub search_path: String,
	/// Must contain `{id}`.
	pub delete_path: String,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
			search_path: DEFAULT_SEARCH_PATH.to_string(),
			delete_path: DEFAULT_DELETE_PATH.to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
	pub page_size: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteConfig {
	pub concurrency: usize,
}

impl Default for DeleteConfig {
	fn default() -> Self {
		Self {
			concurrency: DEFAULT_CONCURRENCY,
		}
	}
}

impl PurgeConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			logging: build_logging_config(layer.logging)?,
			http: build_http_config(layer.http),
			search: SearchConfig {
				page_size: layer
					.search
					.and_then(|s| s.page_size)
					.unwrap_or(DEFAULT_PAGE_SIZE),
			},
			delete: DeleteConfig {
				concurrency: layer
					.delete
					.and_then(|d| d.concurrency)
					.unwrap_or(DEFAULT_CONCURRENCY),
			},
			paths,
		})
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	Ok(LoggingConfig {
		level: parse_log_level(layer.level.as_deref())?,
		format: parse_log_format(layer.format.as_deref())?,
	})
}

fn build_http_config(layer: Option<HttpLayer>) -> HttpConfig {
	let layer = layer.unwrap_or_default();
	HttpConfig {
		timeout: Duration::from_secs(layer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
		search_path: layer
			.search_path
			.unwrap_or_else(|| DEFAULT_SEARCH_PATH.to_string()),
		delete_path: layer
			.delete_path
			.unwrap_or_else(|| DEFAULT_DELETE_PATH.to_string()),
	}
}

fn parse_log_level(s: Option<&str>) -> Result<LogLevel, ConfigError> {
	match s.map(str::to_ascii_lowercase).as_deref() {
		None => Ok(LogLevel::default()),
		Some("error") => Ok(LogLevel::Error),
		Some("warn") => Ok(LogLevel::Warn),
		Some("info") => Ok(LogLevel::Info),
		Some("debug") => Ok(LogLevel::Debug),
		Some("trace") => Ok(LogLevel::Trace),
		Some(other) => Err(ConfigError::invalid_value(
			"logging.level",
			format!("unknown level '{other}'"),
		)),
	}
}

fn parse_log_format(s: Option<&str>) -> Result<LogFormat, ConfigError> {
	match s.map(str::to_ascii_lowercase).as_deref() {
		None => Ok(LogFormat::default()),
		Some("pretty") => Ok(LogFormat::Pretty),
		Some("json") => Ok(LogFormat::Json),
		Some("compact") => Ok(LogFormat::Compact),
		Some(other) => Err(ConfigError::invalid_value(
			"logging.format",
			format!("unknown format '{other}'"),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::{DeleteLayer, SearchLayer};

	#[test]
	fn test_empty_layer_yields_defaults() {
		let config = PurgeConfig::from_layer(ConfigLayer::default(), PathsConfig::default()).unwrap();

		assert_eq!(config.logging, LoggingConfig::default());
		assert_eq!(config.http, HttpConfig::default());
		assert_eq!(config.search.page_size, 50);
		assert_eq!(config.delete.concurrency, 1);
	}

	#[test]
	fn test_defaults_track_the_directory_client() {
		let http = HttpConfig::default();
		let client = purge_directory::ClientSettings::default();

		assert_eq!(http.timeout, client.timeout);
		assert_eq!(http.search_path, client.search_path);
		assert_eq!(http.delete_path, client.delete_path);
		assert_eq!(
			SearchConfig::default().page_size,
			purge_directory::ResolverConfig::default().page_size
		);
	}

	#[test]
	fn test_layer_values_are_applied() {
		let layer = ConfigLayer {
			logging: Some(LoggingLayer {
				level: Some("DEBUG".to_string()),
				format: Some("json".to_string()),
			}),
			http: Some(HttpLayer {
				timeout_secs: Some(5),
				..Default::default()
			}),
			search: Some(SearchLayer {
				page_size: Some(200),
			}),
			delete: Some(DeleteLayer {
				concurrency: Some(4),
			}),
		};

		let config = PurgeConfig::from_layer(layer, PathsConfig::default()).unwrap();

		assert_eq!(config.logging.level, LogLevel::Debug);
		assert_eq!(config.logging.format, LogFormat::Json);
		assert_eq!(config.http.timeout, Duration::from_secs(5));
		assert_eq!(config.http.delete_path, DEFAULT_DELETE_PATH);
		assert_eq!(config.search.page_size, 200);
		assert_eq!(config.delete.concurrency, 4);
	}

	#[test]
	fn test_unknown_log_level_is_rejected() {
		let layer = ConfigLayer {
			logging: Some(LoggingLayer {
				level: Some("loud".to_string()),
				format: None,
			}),
			..Default::default()
		};

		let err = PurgeConfig::from_layer(layer, PathsConfig::default()).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
	}
}
