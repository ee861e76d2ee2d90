// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for purge-users.
//!
//! Layers, lowest precedence first: built-in defaults, the TOML config file,
//! `PURGE_*` environment variables, command-line flags.

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{DeleteConfig, HttpConfig, LogFormat, LogLevel, LoggingConfig, PurgeConfig, SearchConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, applying `cli` last.
///
/// `cli.config_file` replaces the XDG user config file and must exist.
pub fn load_config(cli: CliOverrides) -> Result<PurgeConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;
	let file = match cli.config_file.clone() {
		Some(path) => sources::FileSource::explicit(path),
		None => sources::FileSource::user(&paths),
	};

	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(file));
	registry.register(Box::new(sources::EnvSource::from_process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
