// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use async_trait::async_trait;
use purge_common_secret::SecretString;
use reqwest::{Client, Response};
use tracing::instrument;
use url::Url;

use crate::error::{DirectoryError, Result};
use crate::model::RecordId;
use crate::query::{SearchPage, SearchRequest};

pub const DEFAULT_SEARCH_PATH: &str = "/api/v1/users/search";
pub const DEFAULT_DELETE_PATH: &str = "/scim/v2/Users/{id}";

/// Placeholder in the delete path replaced by the record id.
pub const RECORD_ID_PLACEHOLDER: &str = "{id}";

/// The two remote operations the pipeline needs.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
	/// Fetch one page of users matching `request`.
	async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;

	/// Delete a single user. Any 2xx response is success.
	async fn delete_user(&self, record_id: &RecordId) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
	pub timeout: Duration,
	pub search_path: String,
	pub delete_path: String,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			timeout: purge_common_http::DEFAULT_TIMEOUT,
			search_path: DEFAULT_SEARCH_PATH.to_string(),
			delete_path: DEFAULT_DELETE_PATH.to_string(),
		}
	}
}

/// [`DirectoryApi`] over the tenant's REST search and SCIM delete endpoints.
pub struct HttpDirectoryClient {
	http: Client,
	base_url: Url,
	auth_token: SecretString,
	settings: ClientSettings,
}

/// Builds `https://{tenant}` unless the tenant already carries a scheme.
pub fn tenant_base_url(tenant: &str) -> Result<Url> {
	let tenant = tenant.trim().trim_end_matches('/');
	if tenant.is_empty() {
		return Err(DirectoryError::InvalidTenant("tenant host is empty".to_string()));
	}

	let url = if tenant.contains("://") {
		Url::parse(tenant)?
	} else {
		Url::parse(&format!("https://{tenant}"))?
	};

	if url.host_str().is_none() {
		return Err(DirectoryError::InvalidTenant(tenant.to_string()));
	}
	Ok(url)
}

impl HttpDirectoryClient {
	pub fn for_tenant(tenant: &str, auth_token: SecretString, settings: ClientSettings) -> Result<Self> {
		Self::new(tenant_base_url(tenant)?, auth_token, settings)
	}

	pub fn new(base_url: Url, auth_token: SecretString, settings: ClientSettings) -> Result<Self> {
		let http = purge_common_http::new_client(settings.timeout)?;
		Ok(Self {
			http,
			base_url,
			auth_token,
			settings,
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn api_url(&self, path: &str) -> Result<Url> {
		Ok(self.base_url.join(path)?)
	}

	fn delete_url(&self, record_id: &RecordId) -> Result<Url> {
		let path = self
			.settings
			.delete_path
			.replace(RECORD_ID_PLACEHOLDER, &urlencoding::encode(record_id.as_str()));
		self.api_url(&path)
	}

	async fn check_status(response: Response) -> Result<Response> {
		if !response.status().is_success() {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			return Err(DirectoryError::Api { status, message });
		}
		Ok(response)
	}
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
	#[instrument(skip(self, request), fields(offset = request.offset(), limit = request.query.paging.limit))]
	async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
		let url = self.api_url(&self.settings.search_path)?;

		let response = self
			.http
			.post(url)
			.bearer_auth(self.auth_token.expose())
			.json(request)
			.send()
			.await?;

		let response = Self::check_status(response).await?;
		let body = response.bytes().await?;
		let page = serde_json::from_slice(&body)?;
		Ok(page)
	}

	#[instrument(skip(self), fields(record_id = %record_id))]
	async fn delete_user(&self, record_id: &RecordId) -> Result<()> {
		let url = self.delete_url(record_id)?;

		let response = self
			.http
			.delete(url)
			.bearer_auth(self.auth_token.expose())
			.send()
			.await?;

		Self::check_status(response).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client(base: &str) -> HttpDirectoryClient {
		HttpDirectoryClient::new(
			Url::parse(base).unwrap(),
			SecretString::new("tok".to_string()),
			ClientSettings::default(),
		)
		.unwrap()
	}

	#[test]
	fn bare_host_becomes_https() {
		let url = tenant_base_url("acme.example.com").unwrap();
		assert_eq!(url.as_str(), "https://acme.example.com/");
	}

	#[test]
	fn explicit_scheme_is_kept() {
		let url = tenant_base_url("http://127.0.0.1:8080/").unwrap();
		assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
	}

	#[test]
	fn empty_tenant_is_rejected() {
		assert!(matches!(
			tenant_base_url("  "),
			Err(DirectoryError::InvalidTenant(_))
		));
	}

	#[test]
	fn delete_url_substitutes_record_id() {
		let c = client("https://acme.example.com");
		let url = c.delete_url(&record_id("2819c223-7f76")).unwrap();
		assert_eq!(url.as_str(), "https://acme.example.com/scim/v2/Users/2819c223-7f76");
	}

	#[test]
	fn delete_url_escapes_path_characters() {
		let c = client("https://acme.example.com");
		let url = c.delete_url(&record_id("../admin?x=1")).unwrap();
		assert_eq!(
			url.as_str(),
			"https://acme.example.com/scim/v2/Users/..%2Fadmin%3Fx%3D1"
		);
	}

	#[test]
	fn delete_url_escapes_spaces_and_non_ascii() {
		let c = client("https://acme.example.com");
		let url = c.delete_url(&record_id("a b/é")).unwrap();
		assert_eq!(
			url.as_str(),
			"https://acme.example.com/scim/v2/Users/a%20b%2F%C3%A9"
		);
	}

	fn record_id(raw: &str) -> RecordId {
		RecordId::new(raw)
	}
}
