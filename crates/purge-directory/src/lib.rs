// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lookup-then-delete reconciliation of a local identifier list against a
//! tenant user directory.
//!
//! The pipeline is one-way: identifiers are resolved into a found/not-found
//! partition by [`Resolver`], the found records are deleted one by one by
//! [`Executor`] once a [`Confirmed`] gate has been passed, and
//! [`render_summary`] prints the counters after each phase.

pub mod client;
pub mod confirm;
pub mod error;
pub mod executor;
pub mod export;
pub mod input;
pub mod matching;
pub mod model;
pub mod query;
pub mod report;
pub mod resolver;

pub use client::{tenant_base_url, ClientSettings, DirectoryApi, HttpDirectoryClient};
pub use confirm::{confirm, Confirmed, CONFIRMATION_PHRASE};
pub use error::{DirectoryError, ExportError, InputError, Result};
pub use executor::Executor;
pub use export::{write_partition, ExportPaths};
pub use input::{is_valid_identifier, load_identifiers};
pub use matching::MatchMode;
pub use model::{
	DeletionOutcome, DeletionReport, DeletionStatus, DirectoryRecord, Identifier, RecordId,
	ResolutionResult,
};
pub use report::{render_summary, Counters, DeletionCounters};
pub use resolver::{Resolver, ResolverConfig, DEFAULT_PAGE_SIZE};
