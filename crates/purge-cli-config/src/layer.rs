// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
	#[serde(default)]
	pub http: Option<HttpLayer>,
	#[serde(default)]
	pub search: Option<SearchLayer>,
	#[serde(default)]
	pub delete: Option<DeleteLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HttpLayer {
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub search_path: Option<String>,
	#[serde(default)]
	pub delete_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchLayer {
	#[serde(default)]
	pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteLayer {
	#[serde(default)]
	pub concurrency: Option<usize>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
		merge_option(&mut self.http, other.http, HttpLayer::merge);
		merge_option(&mut self.search, other.search, |t, s| {
			overwrite(&mut t.page_size, s.page_size)
		});
		merge_option(&mut self.delete, other.delete, |t, s| {
			overwrite(&mut t.concurrency, s.concurrency)
		});
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}

	pub(crate) fn http_mut(&mut self) -> &mut HttpLayer {
		self.http.get_or_insert_with(HttpLayer::default)
	}

	pub(crate) fn search_mut(&mut self) -> &mut SearchLayer {
		self.search.get_or_insert_with(SearchLayer::default)
	}

	pub(crate) fn delete_mut(&mut self) -> &mut DeleteLayer {
		self.delete.get_or_insert_with(DeleteLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn overwrite<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		overwrite(&mut self.level, other.level);
		overwrite(&mut self.format, other.format);
	}
}

impl HttpLayer {
	fn merge(&mut self, other: HttpLayer) {
		overwrite(&mut self.timeout_secs, other.timeout_secs);
		overwrite(&mut self.search_path, other.search_path);
		overwrite(&mut self.delete_path, other.delete_path);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full_file() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[logging]
			level = "debug"
			format = "json"

			[http]
			timeout_secs = 10
			search_path = "/v2/users/search"
			delete_path = "/v2/users/{id}"

			[search]
			page_size = 200

			[delete]
			concurrency = 4
			"#,
		)
		.unwrap();

		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
		assert_eq!(layer.http.as_ref().unwrap().timeout_secs, Some(10));
		assert_eq!(layer.search.unwrap().page_size, Some(200));
		assert_eq!(layer.delete.unwrap().concurrency, Some(4));
	}

	#[test]
	fn test_merge_precedence_overwrites_existing_values() {
		let mut base = ConfigLayer {
			http: Some(HttpLayer {
				timeout_secs: Some(30),
				search_path: Some("/base".to_string()),
				delete_path: None,
			}),
			..Default::default()
		};

		let overlay = ConfigLayer {
			http: Some(HttpLayer {
				timeout_secs: Some(5),
				..Default::default()
			}),
			..Default::default()
		};

		base.merge(overlay);

		let http = base.http.unwrap();
		assert_eq!(http.timeout_secs, Some(5));
		assert_eq!(http.search_path.as_deref(), Some("/base"));
	}

	#[test]
	fn test_merge_empty_layer_preserves_all() {
		let mut base = ConfigLayer {
			logging: Some(LoggingLayer {
				level: Some("warn".to_string()),
				format: Some("compact".to_string()),
			}),
			delete: Some(DeleteLayer {
				concurrency: Some(8),
			}),
			..Default::default()
		};
		let before = base.clone();

		base.merge(ConfigLayer::default());

		assert_eq!(base, before);
	}

	#[test]
	fn test_merge_into_empty_base() {
		let mut base = ConfigLayer::default();
		base.merge(ConfigLayer {
			search: Some(SearchLayer {
				page_size: Some(100),
			}),
			..Default::default()
		});

		assert_eq!(base.search.unwrap().page_size, Some(100));
	}
}
