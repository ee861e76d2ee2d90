// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire model for the directory search endpoint.

use serde::{Deserialize, Serialize};

use crate::model::Identifier;

pub const USERNAME_FIELD: &str = "accounts.username";
pub const EMAILS_FIELD: &str = "emails";
pub const SOFT_DELETED_FIELD: &str = "isDeleted";

/// Fields requested for every matched user.
pub const PROJECTION: [&str; 2] = ["accounts", "emails"];

/// Boolean predicate tree understood by the search endpoint.
///
/// Serializes externally tagged, e.g.
/// `{"in":{"field":"emails","values":["a@x.com"]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
	And(Vec<Filter>),
	Or(Vec<Filter>),
	In {
		field: String,
		values: Vec<String>,
	},
	Eq {
		field: String,
		value: serde_json::Value,
	},
}

impl Filter {
	pub fn is_in(field: &str, values: Vec<String>) -> Self {
		Filter::In {
			field: field.to_string(),
			values,
		}
	}

	pub fn eq(field: &str, value: impl Into<serde_json::Value>) -> Self {
		Filter::Eq {
			field: field.to_string(),
			value: value.into(),
		}
	}

	/// Users whose account username or any email is in `identifiers`,
	/// excluding soft-deleted users.
	pub fn live_users_matching(identifiers: &[Identifier]) -> Self {
		let values: Vec<String> = identifiers.iter().map(|id| id.as_str().to_string()).collect();

		Filter::And(vec![
			Filter::Or(vec![
				Filter::is_in(USERNAME_FIELD, values.clone()),
				Filter::is_in(EMAILS_FIELD, values),
			]),
			Filter::eq(SOFT_DELETED_FIELD, false),
		])
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
	pub offset: u64,
	pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
	pub paging: Paging,
	pub filter: Filter,
	pub projection: Vec<String>,
}

/// Body of `POST {search_path}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: SearchQuery,
}

impl SearchRequest {
	/// First page of a search for `identifiers`. The whole identifier set is
	/// carried by every page; only `paging.offset` moves.
	pub fn first_page(identifiers: &[Identifier], page_size: u64) -> Self {
		Self {
			query: SearchQuery {
				paging: Paging {
					offset: 0,
					limit: page_size,
				},
				filter: Filter::live_users_matching(identifiers),
				projection: PROJECTION.iter().map(|f| f.to_string()).collect(),
			},
		}
	}

	pub fn offset(&self) -> u64 {
		self.query.paging.offset
	}

	pub fn set_offset(&mut self, offset: u64) {
		self.query.paging.offset = offset;
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAccount {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
}

/// One matched user as returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteUser {
	#[serde(default)]
	pub accounts: Vec<RemoteAccount>,
	#[serde(default)]
	pub emails: Vec<serde_json::Value>,
}

impl RemoteUser {
	/// The account the directory lists first; the only one we act on.
	pub fn primary_account(&self) -> Option<&RemoteAccount> {
		self.accounts.first()
	}
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
	#[serde(default)]
	pub data: Vec<RemoteUser>,
	#[serde(rename = "totalCount")]
	pub total_count: u64,
}
