// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation.

use purge_directory::client::RECORD_ID_PLACEHOLDER;

use crate::runtime::PurgeConfig;
use crate::ConfigError;

/// Largest page the search endpoint is asked for.
pub const MAX_PAGE_SIZE: u64 = 1000;


/// Validate the complete configuration.
pub fn validate_config(config: &PurgeConfig) -> Result<(), ConfigError> {
	validate_http(config)?;
	validate_search(config)?;
	validate_delete(config)?;
	Ok(())
}

fn validate_http(config: &PurgeConfig) -> Result<(), ConfigError> {
	if config.http.timeout.is_zero() {
		return Err(ConfigError::invalid_value("http.timeout_secs", "must be at least 1"));
	}
	if !config.http.search_path.starts_with('/') {
		return Err(ConfigError::invalid_value(
			"http.search_path",
			"must start with '/'",
		));
	}
	if !config.http.delete_path.contains(RECORD_ID_PLACEHOLDER) {
		return Err(ConfigError::invalid_value(
			"http.delete_path",
			format!("must contain the {RECORD_ID_PLACEHOLDER} placeholder"),
		));
	}
	Ok(())
}

fn validate_search(config: &PurgeConfig) -> Result<(), ConfigError> {
	let page_size = config.search.page_size;
	if page_size == 0 || page_size > MAX_PAGE_SIZE {
		return Err(ConfigError::validation(format!(
			"search.page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
		)));
	}
	Ok(())
}

fn validate_delete(config: &PurgeConfig) -> Result<(), ConfigError> {
	if config.delete.concurrency == 0 {
		return Err(ConfigError::invalid_value("delete.concurrency", "must be at least 1"));
	}
	Ok(())
}
