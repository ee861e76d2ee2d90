// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Summary counters and their plain-text rendering.

use std::fmt::Write;

use crate::model::{DeletionReport, ResolutionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionCounters {
	pub deleted: usize,
	pub errors: usize,
	/// Records skipped because the run was cancelled.
	pub not_attempted: usize,
}

/// Read-only aggregates shown at the two checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
	pub total_requested: usize,
	pub found: usize,
	pub not_found: usize,
	/// Delete targets. Differs from `found` when the input repeats an
	/// identifier or one identifier matched several records.
	pub records: usize,
	pub deletion: Option<DeletionCounters>,
}

impl Counters {
	pub fn after_resolution(result: &ResolutionResult) -> Self {
		Self {
			total_requested: result.total_requested,
			found: result.found_count(),
			not_found: result.not_found_count(),
			records: result.record_count(),
			deletion: None,
		}
	}

	pub fn after_deletion(result: &ResolutionResult, report: &DeletionReport) -> Self {
		let deleted = report.deleted_count();
		let errors = report.error_count();
		Self {
			deletion: Some(DeletionCounters {
				deleted,
				errors,
				not_attempted: result.record_count().saturating_sub(deleted + errors),
			}),
			..Self::after_resolution(result)
		}
	}

	/// `found + not_found == total_requested` and, once deletion ran,
	/// `deleted + errors + not_attempted == records`.
	pub fn is_consistent(&self) -> bool {
		let partition_ok = self.found + self.not_found == self.total_requested;
		let deletion_ok = self
			.deletion
			.map(|d| d.deleted + d.errors + d.not_attempted == self.records)
			.unwrap_or(true);
		partition_ok && deletion_ok
	}
}

/// Renders `counters` as the text block printed after each phase.
pub fn render_summary(counters: &Counters) -> String {
	debug_assert!(counters.is_consistent(), "inconsistent counters: {counters:?}");

	let mut out = String::new();
	let _ = writeln!(out, "Summary");
	let _ = writeln!(out, "  Requested:  {}", counters.total_requested);
	let _ = writeln!(out, "  Found:      {}", counters.found);
	if counters.records != counters.found {
		let _ = writeln!(out, "  Records:    {}", counters.records);
	}
	let _ = writeln!(out, "  Not found:  {}", counters.not_found);

	if let Some(deletion) = counters.deletion {
		let _ = writeln!(out, "  Deleted:    {}", deletion.deleted);
		let _ = writeln!(out, "  Errors:     {}", deletion.errors);
		if deletion.not_attempted > 0 {
			let _ = writeln!(out, "  Skipped:    {} (cancelled)", deletion.not_attempted);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{DeletionOutcome, DeletionStatus, DirectoryRecord, Identifier};
	use crate::query::{RemoteAccount, RemoteUser};

	fn record(id: &str, username: &str) -> DirectoryRecord {
		DirectoryRecord::from_remote(&RemoteUser {
			accounts: vec![RemoteAccount {
				id: Some(id.to_string()),
				username: Some(username.to_string()),
			}],
			emails: vec![],
		})
		.unwrap()
	}

	fn scenario() -> ResolutionResult {
		ResolutionResult {
			found: vec![record("u-a", "a@x.com"), record("u-c", "c@x.com")],
			not_found: vec![Identifier::new("b@x.com")],
			total_requested: 3,
		}
	}

	#[test]
	fn resolution_summary() {
		let counters = Counters::after_resolution(&scenario());

		assert_eq!(counters.found, 2);
		assert_eq!(counters.not_found, 1);
		assert!(counters.is_consistent());
		assert_eq!(
			render_summary(&counters),
			"Summary\n  Requested:  3\n  Found:      2\n  Not found:  1\n"
		);
	}

	#[test]
	fn deletion_summary() {
		let result = scenario();
		let report = DeletionReport {
			outcomes: result
				.found
				.iter()
				.map(|r| DeletionOutcome {
					record: r.clone(),
					status: DeletionStatus::Deleted,
				})
				.collect(),
			cancelled: false,
		};

		let counters = Counters::after_deletion(&result, &report);

		assert_eq!(
			counters.deletion,
			Some(DeletionCounters {
				deleted: 2,
				errors: 0,
				not_attempted: 0
			})
		);
		let text = render_summary(&counters);
		assert!(text.contains("Deleted:    2"));
		assert!(text.contains("Errors:     0"));
		assert!(!text.contains("Skipped"));
	}

	#[test]
	fn cancelled_run_reports_skipped() {
		let result = scenario();
		let report = DeletionReport {
			outcomes: vec![DeletionOutcome {
				record: result.found[0].clone(),
				status: DeletionStatus::Failed {
					reason: "timeout".to_string(),
				},
			}],
			cancelled: true,
		};

		let counters = Counters::after_deletion(&result, &report);

		assert!(counters.is_consistent());
		assert!(render_summary(&counters).contains("Skipped:    1 (cancelled)"));
	}

	#[test]
	fn repeated_identifier_shows_record_count() {
		let result = ResolutionResult {
			found: vec![record("u-a", "a@x.com")],
			not_found: vec![],
			total_requested: 2,
		};

		let text = render_summary(&Counters::after_resolution(&result));
		assert!(text.contains("Found:      2"));
		assert!(text.contains("Records:    1"));
	}

	#[test]
	fn rendering_is_stateless() {
		let counters = Counters::after_resolution(&scenario());
		assert_eq!(render_summary(&counters), render_summary(&counters));
	}
}
