// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_DIR: &str = "purge";
const CONFIG_FILE: &str = "config.toml";

/// Resolved paths for purge-users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/purge/config.toml
	pub user_config_file: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/purge/config.toml"),
		}
	}
}

/// Resolve paths according to the XDG Base Directory Specification.
///
/// Uses `XDG_CONFIG_HOME` when set, otherwise `~/.config`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
		Some(dir) if !dir.is_empty() => PathBuf::from(dir),
		_ => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	tracing::debug!(config_home = %config_home.display(), "resolved XDG paths");

	Ok(paths_under(&config_home))
}

pub(crate) fn paths_under(config_home: &Path) -> PathsConfig {
	PathsConfig {
		user_config_file: config_home.join(APP_DIR).join(CONFIG_FILE),
	}
}
