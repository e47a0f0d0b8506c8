//! Reqwest-backed platform client

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::models::PageResponse;
use super::urls;
use crate::org::{EntityKind, Organization};

/// Transport boundary for the entity endpoints. The fetcher and applier
/// depend on this trait only, so tests run against an in-memory
/// implementation.
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// Fetch one listing page of `kind` from `org`.
    async fn get_page(
        &self,
        org: &Organization,
        kind: EntityKind,
        page: usize,
    ) -> Result<PageResponse>;

    /// Create a batch of entities in `org`.
    async fn create_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        payloads: &[Value],
    ) -> Result<()>;

    /// Overwrite a batch of entities in `org`.
    async fn update_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        payloads: &[Value],
    ) -> Result<()>;

    /// Delete a batch of entities from `org` by name.
    async fn delete_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        names: &[String],
    ) -> Result<()>;
}

/// HTTP client for the platform REST API.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlatformClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("HTTP {}: {}", status, body.trim())
    }
}

impl Default for PlatformClient {
    fn default() -> Self {
        Self::new(urls::DEFAULT_PLATFORM_URL)
    }
}

#[async_trait]
impl EntityApi for PlatformClient {
    async fn get_page(
        &self,
        org: &Organization,
        kind: EntityKind,
        page: usize,
    ) -> Result<PageResponse> {
        let url = urls::page_url(&self.base_url, org.id(), kind, page);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(org.api_key())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response)
            .await?
            .json::<PageResponse>()
            .await
            .context("malformed page response")
    }

    async fn create_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        payloads: &[Value],
    ) -> Result<()> {
        let url = urls::batch_url(&self.base_url, org.id(), kind);
        debug!("POST {} ({} items)", url, payloads.len());
        let response = self
            .http
            .post(&url)
            .bearer_auth(org.api_key())
            .json(payloads)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response).await.map(|_| ())
    }

    async fn update_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        payloads: &[Value],
    ) -> Result<()> {
        let url = urls::batch_url(&self.base_url, org.id(), kind);
        debug!("PUT {} ({} items)", url, payloads.len());
        let response = self
            .http
            .put(&url)
            .bearer_auth(org.api_key())
            .json(payloads)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response).await.map(|_| ())
    }

    async fn delete_batch(
        &self,
        org: &Organization,
        kind: EntityKind,
        names: &[String],
    ) -> Result<()> {
        let url = urls::delete_url(&self.base_url, org.id(), kind, names);
        debug!("DELETE {} ({} names)", url, names.len());
        let response = self
            .http
            .delete(&url)
            .bearer_auth(org.api_key())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        Self::check(response).await.map(|_| ())
    }
}
