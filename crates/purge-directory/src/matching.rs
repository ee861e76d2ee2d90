// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! How a requested identifier is compared with a record's matched identifier.

use std::collections::HashSet;

use crate::model::Identifier;

/// Comparison used to decide whether an identifier was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
	/// Whole-string, case-sensitive equality. No trimming or folding.
	#[default]
	Exact,
}

impl MatchMode {
	/// Form of `identifier` that is compared under this mode.
	fn key<'a>(self, identifier: &'a Identifier) -> &'a str {
		match self {
			MatchMode::Exact => identifier.as_str(),
		}
	}
}

/// Set of matched identifiers, queried once per requested identifier.
///
/// A requested identifier is found when its [`MatchMode`] key equals the
/// key of some matched identifier.
#[derive(Debug, Default)]
pub struct MatchIndex<'a> {
	mode: MatchMode,
	keys: HashSet<&'a str>,
}

impl<'a> MatchIndex<'a> {
	pub fn new(mode: MatchMode, matched: impl IntoIterator<Item = &'a Identifier>) -> Self {
		let keys = matched.into_iter().map(|m| mode.key(m)).collect();
		Self { mode, keys }
	}

	pub fn contains(&self, requested: &Identifier) -> bool {
		self.keys.contains(self.mode.key(requested))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn index(mode: MatchMode, matched: &[Identifier]) -> MatchIndex<'_> {
		MatchIndex::new(mode, matched)
	}

	#[test]
	fn exact_is_case_sensitive() {
		let matched = vec![Identifier::new("alice@x.com")];
		let index = index(MatchMode::Exact, &matched);
		assert!(!index.contains(&Identifier::new("Alice@x.com")));
		assert!(index.contains(&Identifier::new("alice@x.com")));
	}

	#[test]
	fn exact_does_not_trim() {
		let matched = vec![Identifier::new("a@x.com ")];
		let index = index(MatchMode::Exact, &matched);
		assert!(!index.contains(&Identifier::new("a@x.com")));
	}

	#[test]
	fn index_agrees_with_pairwise_keys() {
		let mode = MatchMode::Exact;
		let matched = vec![Identifier::new("a@x.com"), Identifier::new("c@x.com")];
		let index = index(mode, &matched);

		for requested in ["a@x.com", "b@x.com", "c@x.com", "A@x.com"] {
			let requested = Identifier::new(requested);
			let pairwise = matched.iter().any(|m| mode.key(m) == mode.key(&requested));
			assert_eq!(index.contains(&requested), pairwise, "{requested}");
		}
	}

	#[test]
	fn empty_index_contains_nothing() {
		let index = index(MatchMode::default(), &[]);
		assert!(!index.contains(&Identifier::new("a@x.com")));
	}
}
