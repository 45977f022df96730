//! Podcast domain model.
//!
//! * [`PodcastRequest`] with its [`Tone`] / [`Language`] options.
//! * [`Script`] / [`ScriptTurn`]: tagged script representation and the
//!   transcript serialisation rule.
//! * [`PodcastResult`]: the aggregated session result.
//! * [`PodcastError`]: error variants for every podcast operation.

pub mod error;
pub mod request;
pub mod result;
pub mod script;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use error::PodcastError;
pub use request::{Language, PodcastRequest, Tone};
pub use result::PodcastResult;
pub use script::{Script, ScriptTurn};
