//! Client for the remote podcast generation service.
//!
//! This module provides:
//! * [`PodcastApi`]: async trait over the three remote operations.
//! * [`HttpPodcastApi`]: reqwest implementation talking JSON over HTTP.
//! * [`ApiFailure`]: why a remote call failed.
//! * Wire bodies ([`GenerateResponse`], [`TranslateResponse`],
//!   [`SpeechResponse`]).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use agentcast::api::{HttpPodcastApi, PodcastApi};
//! use agentcast::config::AppConfig;
//! use agentcast::podcast::{Language, PodcastRequest, Tone};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let api = HttpPodcastApi::from_config(&config.api);
//!
//!     let request = PodcastRequest::new("space travel", Tone::Casual, Language::English).unwrap();
//!     let generated = api.generate(&request).await.unwrap();
//!     println!("{}", generated.script.to_transcript());
//! }
//! ```

pub mod client;
pub mod wire;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiFailure, HttpPodcastApi, PodcastApi};
pub use wire::{GenerateResponse, SpeechResponse, TranslateResponse};
