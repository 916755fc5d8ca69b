//! HTTP access to the `GET /quota` endpoint.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::config::PollerConfig;

/// Body of a `GET /quota` response.
///
/// A missing `status` reads as `false`. `quota` may be absent when the
/// backend rejects the request.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QuotaResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub quota: Option<f64>,
}

/// Boxed future returned by [`QuotaSource::fetch`].
pub type QuotaFuture<'a> = BoxFuture<'a, Result<QuotaResponse, String>>;

/// Anything that can report the current quota.
///
/// [`QuotaClient`] is the HTTP implementation. Pollers only depend on this
/// trait, so tests and embedders can plug in their own source.
pub trait QuotaSource: Send + Sync {
    fn fetch(&self) -> QuotaFuture<'_>;
}

impl<T: QuotaSource + ?Sized> QuotaSource for Arc<T> {
    fn fetch(&self) -> QuotaFuture<'_> {
        (**self).fetch()
    }
}

/// Async HTTP client for the quota endpoint.
#[derive(Debug, Clone)]
pub struct QuotaClient {
    client: reqwest::Client,
    url: String,
}

impl QuotaClient {
    /// Client for `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        Self::from_config(&PollerConfig::new(base_url))
    }

    /// Client using the URL, timeout and user agent from `config`.
    pub fn from_config(config: &PollerConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            url: config.quota_url(),
        })
    }

    /// The endpoint this client queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current quota.
    ///
    /// Transport errors, non-2xx statuses and bodies that are not a quota
    /// object all come back as `Err`.
    pub async fn fetch_quota(&self) -> Result<QuotaResponse, String> {
        debug!("Quota request: GET {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| format!("quota request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read quota response: {e}"))?;

        if !status.is_success() {
            return Err(format!("quota API HTTP {status}: {text}"));
        }

        trace!("Quota response body: {text}");
        serde_json::from_str::<QuotaResponse>(&text)
            .map_err(|e| format!("malformed quota response: {e}"))
    }
}

impl QuotaSource for QuotaClient {
    fn fetch(&self) -> QuotaFuture<'_> {
        self.fetch_quota().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_status_and_quota() {
        let resp: QuotaResponse = serde_json::from_str(r#"{"status":true,"quota":42.5}"#).unwrap();
        assert!(resp.status);
        assert_eq!(resp.quota, Some(42.5));
    }

    #[test]
    fn missing_status_reads_false() {
        let resp: QuotaResponse = serde_json::from_str(r#"{"quota":1}"#).unwrap();
        assert!(!resp.status);
    }

    #[test]
    fn extra_fields_ignored() {
        let resp: QuotaResponse =
            serde_json::from_str(r#"{"status":false,"error":"not logged in"}"#).unwrap();
        assert!(!resp.status);
        assert!(resp.quota.is_none());
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(serde_json::from_str::<QuotaResponse>("[1,2]").is_err());
    }

    #[test]
    fn client_targets_quota_path() {
        let client = QuotaClient::new("http://127.0.0.1:9/").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9/quota");
    }
}
