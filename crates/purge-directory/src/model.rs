// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Values flowing through the lookup-then-delete pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::RemoteUser;

/// A caller-supplied email naming a user to delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Identifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Opaque directory id; the target of a delete call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A remote user matched during resolution.
///
/// Only built from a search result, never locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
	matched_identifier: Identifier,
	record_id: RecordId,
	username: String,
}

impl DirectoryRecord {
	/// Reads the primary account of `user`.
	///
	/// Returns `None` when there is no account, or its username or id is
	/// missing or empty.
	pub fn from_remote(user: &RemoteUser) -> Option<Self> {
		let account = user.primary_account()?;
		let username = account.username.as_deref().filter(|u| !u.is_empty())?;
		let id = account.id.as_deref().filter(|id| !id.is_empty())?;

		Some(Self {
			matched_identifier: Identifier::new(username),
			record_id: RecordId(id.to_string()),
			username: username.to_string(),
		})
	}

	/// The identifier this record satisfies, compared against the input list.
	pub fn matched_identifier(&self) -> &Identifier {
		&self.matched_identifier
	}

	pub fn record_id(&self) -> &RecordId {
		&self.record_id
	}

	pub fn username(&self) -> &str {
		&self.username
	}
}

/// Partition of the requested identifiers.
///
/// Every requested identifier is either satisfied by a record in `found` or
/// listed in `not_found`. `found` holds each remote record once, in the
/// order the directory returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
	pub found: Vec<DirectoryRecord>,
	pub not_found: Vec<Identifier>,
	pub total_requested: usize,
}

impl ResolutionResult {
	/// Number of requested identifiers satisfied by some found record.
	pub fn found_count(&self) -> usize {
		self.total_requested - self.not_found.len()
	}

	/// Number of delete targets. Equals `found_count` unless the input
	/// repeats an identifier or one identifier matched several records.
	pub fn record_count(&self) -> usize {
		self.found.len()
	}

	pub fn not_found_count(&self) -> usize {
		self.not_found.len()
	}

	pub fn is_empty(&self) -> bool {
		self.found.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
	Deleted,
	Failed { reason: String },
}

/// Result of the single delete attempt made for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
	pub record: DirectoryRecord,
	pub status: DeletionStatus,
}

impl DeletionOutcome {
	pub fn is_deleted(&self) -> bool {
		matches!(self.status, DeletionStatus::Deleted)
	}
}

/// Outcomes in found-list order.
///
/// When `cancelled` is set, the trailing records had no delete attempted
/// and have no outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
	pub outcomes: Vec<DeletionOutcome>,
	pub cancelled: bool,
}

impl DeletionReport {
	pub fn deleted_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_deleted()).count()
	}

	pub fn error_count(&self) -> usize {
		self.outcomes.len() - self.deleted_count()
	}

	pub fn attempted(&self) -> usize {
		self.outcomes.len()
	}
}
