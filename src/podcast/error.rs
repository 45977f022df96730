//! Errors surfaced by podcast operations.

use thiserror::Error;

use crate::api::ApiFailure;

/// Errors returned by the orchestrator and request constructors.
///
/// Every variant is recoverable: the session returns to its idle, retry-able
/// state after any of them.
#[derive(Debug, Error)]
pub enum PodcastError {
    /// The generate call failed.
    #[error("script generation failed: {0}")]
    Generation(ApiFailure),

    /// The translate call failed.  The previous script is kept.
    #[error("translation failed: {0}")]
    Translation(ApiFailure),

    /// The text-to-speech call failed.
    #[error("audio synthesis failed: {0}")]
    Synthesis(ApiFailure),

    /// The request did not pass validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A follow-up operation was requested before any script was generated.
    #[error("no podcast has been generated yet")]
    NoResult,

    /// A translate or synthesize call is already in flight.
    #[error("another translation or audio synthesis is already running")]
    Busy,

    /// The session was reset while the call was in flight; its response was
    /// dropped.
    #[error("response discarded because the session was reset")]
    Discarded,
}

impl PodcastError {
    /// The underlying service failure, if any.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            PodcastError::Generation(f)
            | PodcastError::Translation(f)
            | PodcastError::Synthesis(f) => Some(f),
            _ => None,
        }
    }

    /// `true` when the service did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self.api_failure(), Some(ApiFailure::Timeout))
    }
}
