// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction.
//!
//! Every request the purge tools send goes through a client built here so
//! that the User-Agent and the request timeout are applied uniformly.
//! Requests are never replayed; callers see the first failure.

mod client;

pub use client::{builder, new_client, user_agent, DEFAULT_TIMEOUT};
