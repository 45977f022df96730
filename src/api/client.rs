//! Core `PodcastApi` trait and `HttpPodcastApi` implementation.
//!
//! `HttpPodcastApi` talks to the podcast generation service over plain JSON
//! POST requests.  All connection details come from [`ApiConfig`]; nothing
//! is hardcoded.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::wire::{
    self, GenerateResponse, SpeechBody, SpeechResponse, TranslateBody, TranslateResponse,
};
use crate::config::ApiConfig;
use crate::podcast::{PodcastRequest, Script};

// ---------------------------------------------------------------------------
// ApiFailure
// ---------------------------------------------------------------------------

/// Why a call to the generation service failed.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The service answered with a non-2xx status.  `message` is the
    /// service's own error text when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiFailure::Timeout
        } else if e.is_decode() {
            ApiFailure::Parse(e.to_string())
        } else {
            ApiFailure::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// PodcastApi trait
// ---------------------------------------------------------------------------

/// The three remote operations the client depends on.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn PodcastApi>`.
#[async_trait]
pub trait PodcastApi: Send + Sync {
    /// `POST /generate-podcast`
    async fn generate(&self, request: &PodcastRequest) -> Result<GenerateResponse, ApiFailure>;

    /// `POST /translate`
    async fn translate(
        &self,
        script: &Script,
        target_language: &str,
    ) -> Result<TranslateResponse, ApiFailure>;

    /// `POST /text-to-speech`
    async fn synthesize(&self, script: &Script, language: &str)
        -> Result<SpeechResponse, ApiFailure>;
}

// ---------------------------------------------------------------------------
// HttpPodcastApi
// ---------------------------------------------------------------------------

/// reqwest-backed client for the generation service.
pub struct HttpPodcastApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPodcastApi {
    /// Build a client from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used if the
    /// builder fails.
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client, shared with the audio exporter.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiFailure>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("api: POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = wire::error_message(&text)
                .unwrap_or_else(|| format!("service responded with HTTP {}", status.as_u16()));
            log::warn!("api: POST {path} failed with {status}: {message}");
            return Err(ApiFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiFailure::Parse(e.to_string()))
    }
}

#[async_trait]
impl PodcastApi for HttpPodcastApi {
    async fn generate(&self, request: &PodcastRequest) -> Result<GenerateResponse, ApiFailure> {
        self.post_json("/generate-podcast", request).await
    }

    async fn translate(
        &self,
        script: &Script,
        target_language: &str,
    ) -> Result<TranslateResponse, ApiFailure> {
        let body = TranslateBody {
            script,
            target_language,
        };
        self.post_json("/translate", &body).await
    }

    async fn synthesize(
        &self,
        script: &Script,
        language: &str,
    ) -> Result<SpeechResponse, ApiFailure> {
        let body = SpeechBody { script, language };
        self.post_json("/text-to-speech", &body).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
