// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Writes the found / not-found partition to flat files.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::ExportError;
use crate::model::ResolutionResult;

pub const FOUND_FILE: &str = "found_users.txt";
pub const NOT_FOUND_FILE: &str = "not_found_users.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
	pub found: PathBuf,
	pub not_found: PathBuf,
}

/// Writes one identifier per line into `dir`, replacing existing files.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn write_partition(dir: &Path, result: &ResolutionResult) -> Result<ExportPaths, ExportError> {
	let paths = ExportPaths {
		found: dir.join(FOUND_FILE),
		not_found: dir.join(NOT_FOUND_FILE),
	};

	let found = lines(result.found.iter().map(|r| r.matched_identifier().as_str()));
	let not_found = lines(result.not_found.iter().map(|id| id.as_str()));

	write(&paths.found, found).await?;
	write(&paths.not_found, not_found).await?;

	info!(
		found = result.found.len(),
		not_found = result.not_found.len(),
		"exported resolution lists"
	);
	Ok(paths)
}

fn lines<'a>(items: impl Iterator<Item = &'a str>) -> String {
	let mut out = String::new();
	for item in items {
		out.push_str(item);
		out.push('\n');
	}
	out
}

async fn write(path: &Path, contents: String) -> Result<(), ExportError> {
	tokio::fs::write(path, contents)
		.await
		.map_err(|source| ExportError {
			path: path.to_path_buf(),
			source,
		})
}
