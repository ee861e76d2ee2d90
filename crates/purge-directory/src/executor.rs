// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deletion Executor: one delete call per found record.
//!
//! A failed delete is recorded and the batch moves on. Nothing is retried
//! and nothing already deleted is rolled back.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::client::DirectoryApi;
use crate::confirm::{confirm, Confirmed};
use crate::model::{DeletionOutcome, DeletionReport, DeletionStatus, DirectoryRecord};

/// Deletes in flight at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 1;

pub struct Executor<'a, A: DirectoryApi + ?Sized> {
	api: &'a A,
	concurrency: usize,
	cancel: CancellationToken,
}

impl<'a, A: DirectoryApi + ?Sized> Executor<'a, A> {
	/// Sequential executor: each delete completes before the next starts.
	pub fn new(api: &'a A) -> Self {
		Self {
			api,
			concurrency: DEFAULT_CONCURRENCY,
			cancel: CancellationToken::new(),
		}
	}

	/// Allow up to `limit` deletes in flight. Outcomes keep found-list order.
	pub fn with_concurrency(mut self, limit: usize) -> Self {
		self.concurrency = limit.max(1);
		self
	}

	/// Stop issuing deletes once `cancel` fires.
	pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
		self.cancel = cancel;
		self
	}

	/// Deletes every record in `found`, in order.
	///
	/// Requires a [`Confirmed`] from [`crate::confirm`]: the operator must
	/// have typed the confirmation phrase before this is called.
	///
	/// `on_outcome` sees each outcome as soon as it is known, in found-list
	/// order.
	#[instrument(skip_all, fields(records = found.len(), concurrency = self.concurrency))]
	pub async fn execute<F>(
		&self,
		found: &[DirectoryRecord],
		_confirmed: &Confirmed,
		mut on_outcome: F,
	) -> DeletionReport
	where
		F: FnMut(&DeletionOutcome),
	{
		let mut report = DeletionReport {
			outcomes: Vec::with_capacity(found.len()),
			cancelled: false,
		};

		if self.concurrency == 1 {
			for record in found {
				if self.cancel.is_cancelled() {
					report.cancelled = true;
					break;
				}
				let outcome = self.delete_one(record).await;
				on_outcome(&outcome);
				report.outcomes.push(outcome);
			}
		} else {
			let cancel = &self.cancel;
			let mut attempts = stream::iter(found)
				.map(|record| async move {
					if cancel.is_cancelled() {
						None
					} else {
						Some(self.delete_one(record).await)
					}
				})
				.buffered(self.concurrency);

			while let Some(attempt) = attempts.next().await {
				match attempt {
					Some(outcome) => {
						on_outcome(&outcome);
						report.outcomes.push(outcome);
					}
					None => report.cancelled = true,
				}
			}
		}

		info!(
			deleted = report.deleted_count(),
			errors = report.error_count(),
			cancelled = report.cancelled,
			"deletion phase finished"
		);
		report
	}

	/// Checks the operator's answer and deletes only if it is the
	/// confirmation phrase.
	///
	/// `None` (no answer, e.g. end of input) and any other answer return
	/// `None` without issuing a single delete.
	pub async fn execute_confirmed<F>(
		&self,
		found: &[DirectoryRecord],
		answer: Option<&str>,
		on_outcome: F,
	) -> Option<DeletionReport>
	where
		F: FnMut(&DeletionOutcome),
	{
		let Some(confirmed) = answer.and_then(confirm) else {
			info!(records = found.len(), "deletion not confirmed");
			return None;
		};
		Some(self.execute(found, &confirmed, on_outcome).await)
	}

	async fn delete_one(&self, record: &DirectoryRecord) -> DeletionOutcome {
		let status = match self.api.delete_user(record.record_id()).await {
			Ok(()) => {
				info!(username = %record.username(), record_id = %record.record_id(), "deleted user");
				DeletionStatus::Deleted
			}
			Err(e) => {
				warn!(
					username = %record.username(),
					record_id = %record.record_id(),
					status = ?e.status(),
					error = %e,
					"failed to delete user"
				);
				DeletionStatus::Failed {
					reason: e.to_string(),
				}
			}
		};

		DeletionOutcome {
			record: record.clone(),
			status,
		}
	}
}
