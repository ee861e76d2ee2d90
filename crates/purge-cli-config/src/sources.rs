// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, file, environment, CLI.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const ENV_PREFIX: &str = "PURGE_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	File = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		// Defaults are applied when the runtime config is built.
		Ok(ConfigLayer::default())
	}
}

/// TOML file source.
pub struct FileSource {
	path: PathBuf,
	required: bool,
	name: &'static str,
}

impl FileSource {
	/// User config: ~/.config/purge/config.toml. Skipped when absent.
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			required: false,
			name: "user-config",
		}
	}

	/// File named with `--config`. Must exist.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			required: true,
			name: "cli-config-file",
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		Precedence::File
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
			path: self.path.clone(),
			source,
		})?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Recognised: `PURGE_LOG_LEVEL`, `PURGE_LOG_FORMAT`,
/// `PURGE_HTTP_TIMEOUT_SECS`, `PURGE_PAGE_SIZE`, `PURGE_DELETE_CONCURRENCY`.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot of the `PURGE_` variables of the current process.
	pub fn from_process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
		Self {
			vars: vars
				.into_iter()
				.filter(|(key, _)| key.starts_with(ENV_PREFIX))
				.collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();

		for (key, value) in &self.vars {
			let value = value.trim();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"PURGE_LOG_LEVEL" => layer.logging_mut().level = Some(value.to_string()),
				"PURGE_LOG_FORMAT" => layer.logging_mut().format = Some(value.to_string()),
				"PURGE_HTTP_TIMEOUT_SECS" => layer.http_mut().timeout_secs = Some(parse_env(key, value)?),
				"PURGE_PAGE_SIZE" => layer.search_mut().page_size = Some(parse_env(key, value)?),
				"PURGE_DELETE_CONCURRENCY" => {
					layer.delete_mut().concurrency = Some(parse_env(key, value)?)
				}
				// PURGE_API_TOKEN and friends are read by the CLI itself.
				_ => {}
			}
		}

		Ok(layer)
	}
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::Env(format!("{key}={value} is not a valid number")))
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub concurrency: Option<usize>,
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref level) = self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if let Some(ref format) = self.overrides.log_format {
			layer.logging_mut().format = Some(format.clone());
		}
		if let Some(concurrency) = self.overrides.concurrency {
			layer.delete_mut().concurrency = Some(concurrency);
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_env_source_reads_known_keys() {
		let layer = EnvSource::from_vars(vars(&[
			("PURGE_LOG_LEVEL", "debug"),
			("PURGE_HTTP_TIMEOUT_SECS", "12"),
			("PURGE_PAGE_SIZE", " 100 "),
			("PURGE_DELETE_CONCURRENCY", "3"),
			("PURGE_UNKNOWN", "x"),
			("HOME", "/root"),
		]))
		.load()
		.unwrap();

		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
		assert_eq!(layer.http.unwrap().timeout_secs, Some(12));
		assert_eq!(layer.search.unwrap().page_size, Some(100));
		assert_eq!(layer.delete.unwrap().concurrency, Some(3));
	}

	#[test]
	fn test_env_source_skips_empty_values() {
		let layer = EnvSource::from_vars(vars(&[("PURGE_LOG_FORMAT", "  ")]))
			.load()
			.unwrap();
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_env_source_rejects_non_numeric() {
		let err = EnvSource::from_vars(vars(&[("PURGE_PAGE_SIZE", "fifty")]))
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::Env(_)));
	}

	#[test]
	fn test_missing_user_file_is_skipped() {
		let dir = TempDir::new().unwrap();
		let source = FileSource::user(&PathsConfig {
			user_config_file: dir.path().join("purge/config.toml"),
		});
		assert_eq!(source.load().unwrap(), ConfigLayer::default());
	}

	#[test]
	fn test_missing_explicit_file_is_an_error() {
		let dir = TempDir::new().unwrap();
		let err = FileSource::explicit(dir.path().join("nope.toml"))
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn test_bad_toml_reports_path() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "[search\npage_size = ").unwrap();

		match FileSource::explicit(path.clone()).load().unwrap_err() {
			ConfigError::TomlParse { path: p, .. } => assert_eq!(p, path),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_cli_source_maps_overrides() {
		let layer = CliSource::new(CliOverrides {
			log_format: Some("json".to_string()),
			concurrency: Some(2),
			..Default::default()
		})
		.load()
		.unwrap();

		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
		assert_eq!(layer.delete.unwrap().concurrency, Some(2));
	}
}
