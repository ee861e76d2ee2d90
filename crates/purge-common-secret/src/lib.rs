// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential wrapper for the directory API token.
//!
//! The tenant API token is passed on the command line and attached to every
//! request as a bearer credential. [`Secret`] keeps it out of logs, config
//! messages and panic output:
//!
//! ```
//! use purge_common_secret::SecretString;
//!
//! let token = SecretString::new("tok_live_123".to_string());
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "tok_live_123");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed instead of the wrapped value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never be printed.
///
/// There is no `Deref`; callers go through [`Secret::expose`] so every use of
/// the raw credential is visible at the call site. The inner value is zeroed
/// on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// The bearer token case.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the raw value, e.g. for `RequestBuilder::bearer_auth`.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the wrapped token is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
