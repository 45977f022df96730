//! Incremental transcript reveal.
//!
//! * [`start_reveal`]: start one timed reveal session.
//! * [`RevealHandle`]: observe, await or cancel a session.
//! * [`Revealer`]: owns the current session and replaces it safely.
//! * [`RevealState`]: progress of a session.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use agentcast::reveal::start_reveal;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut handle = start_reveal("Host: Hi", 1, Duration::from_millis(30));
//!     while let Some(state) = handle.next_update().await {
//!         println!("{}", state.revealed_text());
//!     }
//! }
//! ```

pub mod revealer;

pub use revealer::{start_reveal, RevealHandle, RevealState, Revealer};
