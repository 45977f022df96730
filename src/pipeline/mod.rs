//! Request orchestrator for the AgentCast client.
//!
//! This module sequences the remote calls for one podcast and exposes the
//! shared session state the presentation layer reads.
//!
//! # Architecture
//!
//! ```text
//! PodcastRequest
//!        │
//!        ▼
//! PodcastOrchestrator::generate()   → Stage::GeneratingScript → Idle
//!        │
//!        ├─ translate(target)      → translating flag   (clears audio)
//!        └─ synthesize_audio()     → synthesizing flag
//!
//! SharedSession (Arc<Mutex<SessionState>>) ←── read by the presentation layer
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentcast::api::HttpPodcastApi;
//! use agentcast::config::AppConfig;
//! use agentcast::pipeline::{new_shared_session, PodcastOrchestrator};
//! use agentcast::podcast::{Language, PodcastRequest, Tone};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let session = new_shared_session();
//!     let orchestrator = PodcastOrchestrator::with_session(
//!         session.clone(),
//!         Arc::new(HttpPodcastApi::from_config(&config.api)),
//!     );
//!
//!     let request = PodcastRequest::new("space travel", Tone::Casual, Language::English).unwrap();
//!     match orchestrator.generate(&request).await {
//!         Ok(result) => println!("{}", result.transcript()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     assert!(!session.lock().unwrap().is_busy());
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::PodcastOrchestrator;
pub use state::{new_shared_session, SessionState, SharedSession, Stage};
