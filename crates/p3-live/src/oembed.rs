//! oEmbed client for the public video host.
//!
//! Only the `html` field matters to the router; the rest of the response is
//! kept for callers that want to show a title or thumbnail.

use std::future::Future;
use std::time::Duration;

use p3_config::LiveConfig;
use serde::Deserialize;

use crate::error::OEmbedError;

/// oEmbed JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OEmbed {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl OEmbed {
    /// # Errors
    ///
    /// Returns [`OEmbedError::MissingHtml`] when the response has no
    /// (or an empty) `html` field.
    pub fn into_html(self) -> Result<String, OEmbedError> {
        self.html
            .filter(|html| !html.is_empty())
            .ok_or(OEmbedError::MissingHtml)
    }
}

/// Source of oEmbed metadata for a public watch URL.
pub trait OEmbedFetcher: Send + Sync {
    fn fetch(&self, watch_url: &str) -> impl Future<Output = Result<OEmbed, OEmbedError>> + Send;
}

/// HTTP [`OEmbedFetcher`] for an oEmbed endpoint.
pub struct OEmbedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OEmbedClient {
    /// # Errors
    ///
    /// Returns [`OEmbedError::Http`] if the underlying client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, OEmbedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("p3-live/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &LiveConfig) -> Result<Self, OEmbedError> {
        Self::new(config.oembed_endpoint.clone())
    }

    /// Full request URL for `watch_url`.
    #[must_use]
    pub fn request_url(&self, watch_url: &str) -> String {
        format!(
            "{}?url={}&format=json&scheme=https",
            self.endpoint,
            urlencoding::encode(watch_url)
        )
    }
}

impl OEmbedFetcher for OEmbedClient {
    async fn fetch(&self, watch_url: &str) -> Result<OEmbed, OEmbedError> {
        let url = self.request_url(watch_url);
        tracing::debug!(%url, "fetching oEmbed metadata");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        parse_oembed(&body)
    }
}

fn parse_oembed(body: &str) -> Result<OEmbed, OEmbedError> {
    serde_json::from_str(body).map_err(|e| OEmbedError::Parse(e.to_string()))
}

/// Map 429 and other non-success statuses to errors.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OEmbedError> {
    if resp.status() == 429 {
        return Err(OEmbedError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(OEmbedError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// `Retry-After` in seconds, 60 if absent or unparseable.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
