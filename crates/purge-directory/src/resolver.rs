// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory Resolver: maps requested identifiers to directory records.
//!
//! Pages through the search endpoint with the whole identifier set in the
//! filter, collects well-formed records, then partitions the input into
//! found and not-found by exact identifier comparison.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::client::DirectoryApi;
use crate::error::{DirectoryError, Result};
use crate::matching::{MatchIndex, MatchMode};
use crate::model::{DirectoryRecord, Identifier, ResolutionResult};
use crate::query::SearchRequest;

/// Records requested per search page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
	pub page_size: u64,
	pub match_mode: MatchMode,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
			match_mode: MatchMode::Exact,
		}
	}
}

pub struct Resolver<'a, A: DirectoryApi + ?Sized> {
	api: &'a A,
	config: ResolverConfig,
	cancel: CancellationToken,
}

impl<'a, A: DirectoryApi + ?Sized> Resolver<'a, A> {
	pub fn new(api: &'a A, config: ResolverConfig) -> Self {
		Self {
			api,
			config,
			cancel: CancellationToken::new(),
		}
	}

	/// Stop between pages once `cancel` fires.
	pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
		self.cancel = cancel;
		self
	}

	/// Resolves `identifiers` against the directory.
	///
	/// Any failed search request fails the whole resolution; a partial page
	/// set is never returned.
	#[instrument(skip_all, fields(requested = identifiers.len(), page_size = self.config.page_size))]
	pub async fn resolve(&self, identifiers: &[Identifier]) -> Result<ResolutionResult> {
		if identifiers.is_empty() {
			return Ok(ResolutionResult::default());
		}

		let records = self.fetch_all(identifiers).await?;
		let result = partition(identifiers, records, self.config.match_mode);

		info!(
			found = result.found_count(),
			records = result.record_count(),
			not_found = result.not_found_count(),
			"resolution complete"
		);
		Ok(result)
	}

	async fn fetch_all(&self, identifiers: &[Identifier]) -> Result<Vec<DirectoryRecord>> {
		let page_size = self.config.page_size.max(1);
		let mut request = SearchRequest::first_page(identifiers, page_size);
		let mut records = Vec::new();
		let mut pages = 0u32;

		loop {
			if self.cancel.is_cancelled() {
				return Err(DirectoryError::Cancelled);
			}

			let page = self.api.search(&request).await?;
			pages += 1;

			if page.data.is_empty() {
				debug!(pages, offset = request.offset(), "empty page, stopping");
				break;
			}

			let received = page.data.len();
			let before = records.len();
			records.extend(page.data.iter().filter_map(DirectoryRecord::from_remote));
			let skipped = received - (records.len() - before);
			if skipped > 0 {
				debug!(skipped, "dropped records without username or id");
			}

			let next_offset = request.offset() + page_size;
			debug!(
				pages,
				received,
				total_count = page.total_count,
				next_offset,
				"fetched search page"
			);
			if next_offset >= page.total_count {
				break;
			}
			request.set_offset(next_offset);
		}

		Ok(records)
	}
}

/// Splits `identifiers` into found and not-found.
///
/// A record whose matched identifier is not among the requested ones is
/// dropped: the directory matched it on another field, and deleting it could
/// hit the wrong account. A record returned twice is kept once.
pub fn partition(
	identifiers: &[Identifier],
	records: Vec<DirectoryRecord>,
	mode: MatchMode,
) -> ResolutionResult {
	let requested = MatchIndex::new(mode, identifiers);
	let mut seen_ids = HashSet::new();
	let mut found = Vec::with_capacity(records.len());

	for record in records {
		if !requested.contains(record.matched_identifier()) {
			warn!(
				username = %record.username(),
				record_id = %record.record_id(),
				"directory returned a record for an identifier that was not requested; ignoring"
			);
			continue;
		}
		if !seen_ids.insert(record.record_id().clone()) {
			continue;
		}
		found.push(record);
	}

	let not_found = {
		let matched = MatchIndex::new(mode, found.iter().map(DirectoryRecord::matched_identifier));
		identifiers
			.iter()
			.filter(|id| !matched.contains(id))
			.cloned()
			.collect()
	};

	ResolutionResult {
		found,
		not_found,
		total_requested: identifiers.len(),
	}
}
