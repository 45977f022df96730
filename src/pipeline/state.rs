//! Orchestrator stage and shared session state.
//!
//! [`Stage`] is the coarse progress value for the initial generate call.
//! Translation and audio synthesis are user-initiated follow-ups and are
//! tracked by independent busy flags on [`SessionState`].
//!
//! [`SharedSession`] is a type alias for `Arc<Mutex<SessionState>>`, cheap
//! to clone and safe to share between the orchestrator and the presentation
//! layer.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::podcast::PodcastResult;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Progress of the initial script generation.
///
/// ```text
/// Idle ──generate()──▶ GeneratingScript ──success / failure──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing in flight; a new submission may be issued.
    #[default]
    Idle,

    /// The generate call is in flight.
    GeneratingScript,
}

impl Stage {
    /// ```
    /// use agentcast::pipeline::Stage;
    ///
    /// assert!(!Stage::Idle.is_busy());
    /// assert!(Stage::GeneratingScript.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, Stage::GeneratingScript)
    }

    /// A short human-readable label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Idle => "Idle",
            Stage::GeneratingScript => "Generating script",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs to render the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Progress of the generate call.
    pub stage: Stage,

    /// A text-to-speech call is in flight.
    pub synthesizing: bool,

    /// A translate call is in flight.
    pub translating: bool,

    /// The assembled result.  `None` until a generate call succeeds, and
    /// again after a reset.
    pub result: Option<PodcastResult>,

    /// Message of the most recent failed operation.
    pub last_error: Option<String>,

    /// Stale-response token.  Advanced by every reset; a call only commits
    /// its response when the epoch it captured is still current.
    pub epoch: u64,

    /// Token of the newest generate call.  Advanced by every generate and
    /// every reset; only the call holding the current value may commit or
    /// return the stage to idle.
    pub generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a translate or synthesize call is in flight.
    pub fn is_follow_up_busy(&self) -> bool {
        self.synthesizing || self.translating
    }

    /// `true` while anything at all is in flight.
    pub fn is_busy(&self) -> bool {
        self.stage.is_busy() || self.is_follow_up_busy()
    }

    /// Discard the result and return every flag to rest.
    pub fn clear(&mut self) {
        self.stage = Stage::Idle;
        self.synthesizing = false;
        self.translating = false;
        self.result = None;
        self.last_error = None;
        self.epoch = self.epoch.wrapping_add(1);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Claim the generate slot, superseding any generate still in flight.
    pub fn begin_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.stage = Stage::GeneratingScript;
        self.generation
    }
}

// ---------------------------------------------------------------------------
// SharedSession
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Lock for a short critical section only; never hold the guard across an
/// `.await` point.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Construct a new, idle [`SharedSession`].
pub fn new_shared_session() -> SharedSession {
    Arc::new(Mutex::new(SessionState::new()))
}

/// Lock a session, recovering the guard if a previous holder panicked.
pub(crate) fn lock(session: &SharedSession) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
