// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Input Loader: reads the identifier file.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::error::InputError;
use crate::model::Identifier;

/// A single token with exactly one `@`, no whitespace and no comma.
pub fn is_valid_identifier(candidate: &str) -> bool {
	!candidate.is_empty()
		&& candidate.matches('@').count() == 1
		&& !candidate.chars().any(|c| c.is_whitespace() || c == ',')
}

/// Keeps the valid lines of `contents`, in order, duplicates included.
pub fn parse_identifiers(contents: &str) -> Vec<Identifier> {
	let mut identifiers = Vec::new();

	for (index, line) in contents.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		if !is_valid_identifier(line) {
			warn!(line = index + 1, value = %line, "skipping invalid identifier");
			continue;
		}
		identifiers.push(Identifier::new(line));
	}

	identifiers
}

/// Reads `path` and returns its valid identifiers.
///
/// Fails when the file cannot be read or holds no valid identifier.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_identifiers(path: impl AsRef<Path>) -> Result<Vec<Identifier>, InputError> {
	let path = path.as_ref();
	let contents = tokio::fs::read_to_string(path)
		.await
		.map_err(|source| InputError::Io {
			path: path.to_path_buf(),
			source,
		})?;

	let identifiers = parse_identifiers(&contents);
	if identifiers.is_empty() {
		return Err(InputError::NoValidIdentifiers(path.to_path_buf()));
	}

	debug!(count = identifiers.len(), "loaded identifiers");
	Ok(identifiers)
}
