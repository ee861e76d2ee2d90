// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for directory resolution, input loading and export.

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the remote directory.
///
/// During resolution every variant is fatal. During deletion the executor
/// turns them into per-record [`crate::DeletionStatus::Failed`] outcomes.
#[derive(Error, Debug)]
pub enum DirectoryError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("API error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("malformed response body: {0}")]
	Json(#[from] serde_json::Error),

	#[error("URL parse error: {0}")]
	UrlParse(#[from] url::ParseError),

	#[error("invalid tenant host: {0}")]
	InvalidTenant(String),

	#[error("operation cancelled")]
	Cancelled,
}

impl DirectoryError {
	/// HTTP status of the failed call, when the server answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			DirectoryError::Api { status, .. } => Some(*status),
			DirectoryError::Http(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

/// Failures reading the identifier file. Raised before any network call.
#[derive(Error, Debug)]
pub enum InputError {
	#[error("cannot read identifier file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("no valid identifiers in {0}")]
	NoValidIdentifiers(PathBuf),
}

/// Failures writing the found / not-found lists.
#[derive(Error, Debug)]
#[error("cannot write {path}: {source}")]
pub struct ExportError {
	pub path: PathBuf,
	#[source]
	pub source: std::io::Error,
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_error_exposes_status() {
		let err = DirectoryError::Api {
			status: 404,
			message: "no such user".to_string(),
		};
		assert_eq!(err.status(), Some(404));
		assert_eq!(err.to_string(), "API error: 404 - no such user");
	}

	#[test]
	fn cancelled_has_no_status() {
		assert_eq!(DirectoryError::Cancelled.status(), None);
	}

	#[test]
	fn json_error_converts() {
		let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
		let err: DirectoryError = parse_err.into();
		assert!(matches!(err, DirectoryError::Json(_)));
	}
}
