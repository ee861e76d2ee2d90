// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client with a fixed User-Agent and a bounded timeout.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Applied when the caller does not configure a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a client builder with the standard User-Agent and `timeout`
/// applied to the whole request (connect, send and body read).
///
/// # Example
/// ```ignore
/// let client = purge_common_http::builder(Duration::from_secs(10))
///     .https_only(true)
///     .build()?;
/// ```
pub fn builder(timeout: Duration) -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.timeout(timeout)
		.connect_timeout(timeout.min(Duration::from_secs(10)))
}

/// Creates a client with the standard User-Agent and `timeout`.
pub fn new_client(timeout: Duration) -> reqwest::Result<Client> {
	let client = builder(timeout).build()?;
	tracing::debug!(timeout_ms = timeout.as_millis() as u64, "built HTTP client");
	Ok(client)
}

/// Returns the User-Agent sent with every request.
///
/// Format: `purge-users/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"purge-users/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
