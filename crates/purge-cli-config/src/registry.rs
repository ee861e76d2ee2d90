// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry - manages sources and merges layers.

use tracing::{debug, info};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::PurgeConfig;
use crate::sources::ConfigSource;
use crate::validation::validate_config;
use crate::ConfigError;

/// Registry that manages configuration sources and merges them.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load configuration from all sources, merge, and validate.
	///
	/// Sources are merged lowest precedence first. A source that fails to
	/// load fails the whole load; absent optional files load as empty layers.
	pub fn load(&self, paths: PathsConfig) -> Result<PurgeConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			let layer = source.load()?;
			debug!(source = source.name(), "merging config layer");
			merged.merge(layer);
		}

		let config = PurgeConfig::from_layer(merged, paths)?;
		validate_config(&config)?;

		info!(
			log_level = ?config.logging.level,
			page_size = config.search.page_size,
			concurrency = config.delete.concurrency,
			timeout_secs = config.http.timeout.as_secs(),
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::SearchLayer;
	use crate::sources::{DefaultsSource, Precedence};

	struct MockSource {
		name: &'static str,
		precedence: Precedence,
		page_size: u64,
	}

	impl ConfigSource for MockSource {
		fn name(&self) -> &'static str {
			self.name
		}
		fn precedence(&self) -> Precedence {
			self.precedence
		}
		fn load(&self) -> Result<ConfigLayer, ConfigError> {
			Ok(ConfigLayer {
				search: Some(SearchLayer {
					page_size: Some(self.page_size),
				}),
				..Default::default()
			})
		}
	}

	struct BrokenSource;

	impl ConfigSource for BrokenSource {
		fn name(&self) -> &'static str {
			"broken"
		}
		fn precedence(&self) -> Precedence {
			Precedence::File
		}
		fn load(&self) -> Result<ConfigLayer, ConfigError> {
			Err(ConfigError::Env("boom".to_string()))
		}
	}

	#[test]
	fn test_registry_loads_with_defaults() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(DefaultsSource));
		assert_eq!(registry.source_count(), 1);

		let config = registry.load(PathsConfig::default()).unwrap();
		assert_eq!(config.search.page_size, 50);
	}

	#[test]
	fn test_precedence_merge_order() {
		let mut registry = ConfigRegistry::new();
		// Registered out of order on purpose.
		registry.register(Box::new(MockSource {
			name: "cli",
			precedence: Precedence::Cli,
			page_size: 300,
		}));
		registry.register(Box::new(MockSource {
			name: "file",
			precedence: Precedence::File,
			page_size: 100,
		}));
		registry.register(Box::new(MockSource {
			name: "env",
			precedence: Precedence::Environment,
			page_size: 200,
		}));

		let config = registry.load(PathsConfig::default()).unwrap();
		assert_eq!(config.search.page_size, 300);
	}

	#[test]
	fn test_failing_source_fails_load() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(DefaultsSource));
		registry.register(Box::new(BrokenSource));

		assert!(matches!(
			registry.load(PathsConfig::default()),
			Err(ConfigError::Env(_))
		));
	}

	#[test]
	fn test_invalid_merged_config_is_rejected() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(MockSource {
			name: "file",
			precedence: Precedence::File,
			page_size: 0,
		}));

		assert!(matches!(
			registry.load(PathsConfig::default()),
			Err(ConfigError::Validation(_))
		));
	}
}
