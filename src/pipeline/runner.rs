//! Request orchestrator: drives generate → translate → synthesize.
//!
//! [`PodcastOrchestrator`] owns a [`SharedSession`] and a [`PodcastApi`].
//! Each operation captures the session epoch before its network call and
//! commits only if the epoch is unchanged, so a response that lands after
//! [`reset`](PodcastOrchestrator::reset) is dropped.  A generate call also
//! claims a generation token; a newer generate supersedes it.
//!
//! # Flow
//!
//! ```text
//! generate(request)             [Stage::GeneratingScript]
//!   ├─ Ok  → result = {script, language, topic}           → Idle
//!   └─ Err → previous result untouched, error surfaced    → Idle
//!
//! synthesize_audio()            [synthesizing]
//!   └─ Ok  → result.audio_reference = audio_file
//!
//! translate(target)             [translating]
//!   ├─ same language → no-op, no network call
//!   └─ Ok  → original_script = old script, script = translated,
//!            audio_reference cleared
//! ```
//!
//! Translate and synthesize are mutually exclusive: a new call while either
//! is in flight returns [`PodcastError::Busy`].

use std::sync::Arc;

use crate::api::{ApiFailure, GenerateResponse, PodcastApi};
use crate::podcast::{PodcastError, PodcastRequest, PodcastResult, Script};

use super::state::{lock, new_shared_session, SessionState, SharedSession, Stage};

// ---------------------------------------------------------------------------
// BusyGuard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Busy {
    Generating(u64),
    Synthesizing,
    Translating,
}

/// Returns a stage or busy flag to rest when dropped, whichever way the
/// operation exits.  A reset in the meantime already cleared the flags, so
/// the guard leaves a newer epoch alone.  A superseded generate leaves the
/// stage to the newer call.
struct BusyGuard {
    session: SharedSession,
    busy: Busy,
    epoch: u64,
}

impl BusyGuard {
    fn new(session: &SharedSession, busy: Busy, epoch: u64) -> Self {
        Self {
            session: Arc::clone(session),
            busy,
            epoch,
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut st = lock(&self.session);
        if st.epoch != self.epoch {
            return;
        }
        match self.busy {
            Busy::Generating(generation) => {
                if st.generation == generation {
                    st.stage = Stage::Idle;
                }
            }
            Busy::Synthesizing => st.synthesizing = false,
            Busy::Translating => st.translating = false,
        }
    }
}

// ---------------------------------------------------------------------------
// PodcastOrchestrator
// ---------------------------------------------------------------------------

/// Sequences the remote calls for one podcast session and aggregates their
/// results.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use agentcast::api::HttpPodcastApi;
/// use agentcast::config::AppConfig;
/// use agentcast::pipeline::PodcastOrchestrator;
/// use agentcast::podcast::{Language, PodcastRequest, Tone};
///
/// # async fn example() -> Result<(), agentcast::podcast::PodcastError> {
/// let config = AppConfig::default();
/// let orchestrator = PodcastOrchestrator::new(Arc::new(HttpPodcastApi::from_config(&config.api)));
///
/// let request = PodcastRequest::new("space travel", Tone::Casual, Language::English)?;
/// let result = orchestrator.generate(&request).await?;
/// println!("{}", result.transcript());
///
/// orchestrator.translate("Spanish").await?;
/// let audio = orchestrator.synthesize_audio().await?;
/// println!("audio at {audio}");
/// # Ok(())
/// # }
/// ```
pub struct PodcastOrchestrator {
    session: SharedSession,
    api: Arc<dyn PodcastApi>,
}

impl PodcastOrchestrator {
    /// Create an orchestrator with a fresh, idle session.
    pub fn new(api: Arc<dyn PodcastApi>) -> Self {
        Self::with_session(new_shared_session(), api)
    }

    /// Create an orchestrator over an existing session (e.g. one the
    /// presentation layer also reads).
    pub fn with_session(session: SharedSession, api: Arc<dyn PodcastApi>) -> Self {
        Self { session, api }
    }

    /// Shared handle to the session state.
    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        lock(&self.session).clone()
    }

    pub fn stage(&self) -> Stage {
        lock(&self.session).stage
    }

    pub fn result(&self) -> Option<PodcastResult> {
        lock(&self.session).result.clone()
    }

    /// `true` while a translate or synthesize call is in flight.
    pub fn is_follow_up_busy(&self) -> bool {
        lock(&self.session).is_follow_up_busy()
    }

    // -----------------------------------------------------------------------
    // generate
    // -----------------------------------------------------------------------

    /// Generate a script for `request` and make it the current result.
    ///
    /// On failure the previous result (if any) is kept.  The stage returns
    /// to [`Stage::Idle`] once the newest generate call settles.  A call
    /// overtaken by a newer one returns [`PodcastError::Discarded`].
    pub async fn generate(&self, request: &PodcastRequest) -> Result<PodcastResult, PodcastError> {
        let (epoch, generation) = {
            let mut st = lock(&self.session);
            let generation = st.begin_generation();
            st.last_error = None;
            (st.epoch, generation)
        };
        let _guard = BusyGuard::new(&self.session, Busy::Generating(generation), epoch);

        log::debug!(
            "pipeline: generating script (topic={:?}, tone={}, language={})",
            request.topic(),
            request.tone(),
            request.language()
        );

        let outcome = self
            .api
            .generate(request)
            .await
            .map_err(PodcastError::Generation)
            .and_then(|response| build_result(request, response));

        let mut st = lock(&self.session);
        if st.epoch != epoch {
            log::warn!("pipeline: session reset during generate, dropping response");
            return Err(PodcastError::Discarded);
        }
        if st.generation != generation {
            log::warn!("pipeline: generate superseded by a newer request, dropping response");
            return Err(PodcastError::Discarded);
        }

        match outcome {
            Ok(result) => {
                log::info!(
                    "pipeline: script ready ({} turns, language={})",
                    result.script.turn_count(),
                    result.language
                );
                st.result = Some(result.clone());
                Ok(result)
            }
            Err(e) => Err(record_error(&mut st, e)),
        }
    }

    // -----------------------------------------------------------------------
    // synthesize_audio
    // -----------------------------------------------------------------------

    /// Synthesize audio for the current script and store its locator.
    ///
    /// Never changes the script or language.
    pub async fn synthesize_audio(&self) -> Result<String, PodcastError> {
        let (epoch, script, language) = {
            let mut st = lock(&self.session);
            if st.is_follow_up_busy() {
                return Err(PodcastError::Busy);
            }
            let result = st.result.as_ref().ok_or(PodcastError::NoResult)?;
            let script = result.script.clone();
            let language = result.language.clone();
            st.synthesizing = true;
            st.last_error = None;
            (st.epoch, script, language)
        };
        let _guard = BusyGuard::new(&self.session, Busy::Synthesizing, epoch);

        log::debug!("pipeline: synthesizing audio (language={language})");

        let outcome = match self.api.synthesize(&script, &language).await {
            Ok(response) if response.audio_file.trim().is_empty() => Err(PodcastError::Synthesis(
                ApiFailure::Parse("service returned no audio file".into()),
            )),
            Ok(response) => Ok(response.audio_file),
            Err(e) => Err(PodcastError::Synthesis(e)),
        };

        let mut st = lock(&self.session);
        if st.epoch != epoch {
            log::warn!("pipeline: session reset during synthesis, dropping audio");
            return Err(PodcastError::Discarded);
        }

        match outcome {
            Ok(audio_file) => {
                let Some(result) = st.result.as_mut().filter(|r| r.script == script) else {
                    log::warn!("pipeline: script changed during synthesis, dropping audio");
                    return Err(PodcastError::Discarded);
                };
                result.audio_reference = Some(audio_file.clone());
                log::info!("pipeline: audio ready at {audio_file}");
                Ok(audio_file)
            }
            Err(e) => Err(record_error(&mut st, e)),
        }
    }

    // -----------------------------------------------------------------------
    // translate
    // -----------------------------------------------------------------------

    /// Translate the current script into `target_language`.
    ///
    /// A target equal to the current language (case-insensitive) is a no-op
    /// that returns the current result without a network call.  On success
    /// any synthesized audio is dropped, since it no longer matches the
    /// script.  On failure the result is left unchanged.
    pub async fn translate(&self, target_language: &str) -> Result<PodcastResult, PodcastError> {
        let target = target_language.trim();
        if target.is_empty() {
            return Err(PodcastError::InvalidRequest(
                "target language must not be empty".into(),
            ));
        }

        let (epoch, script) = {
            let mut st = lock(&self.session);
            if st.is_follow_up_busy() {
                return Err(PodcastError::Busy);
            }
            let result = st.result.as_ref().ok_or(PodcastError::NoResult)?;
            if result.is_in_language(target) {
                log::debug!("pipeline: script already in {target}, skipping translation");
                return Ok(result.clone());
            }
            let script = result.script.clone();
            st.translating = true;
            st.last_error = None;
            (st.epoch, script)
        };
        let _guard = BusyGuard::new(&self.session, Busy::Translating, epoch);

        log::debug!("pipeline: translating script to {target}");

        let outcome = match self.api.translate(&script, target).await {
            Ok(response) if response.translated_script.is_empty() => Err(
                PodcastError::Translation(ApiFailure::Parse(
                    "service returned an empty translation".into(),
                )),
            ),
            Ok(response) => Ok(response),
            Err(e) => Err(PodcastError::Translation(e)),
        };

        let mut st = lock(&self.session);
        if st.epoch != epoch {
            log::warn!("pipeline: session reset during translation, dropping response");
            return Err(PodcastError::Discarded);
        }

        match outcome {
            Ok(response) => {
                let Some(result) = st.result.as_mut().filter(|r| r.script == script) else {
                    log::warn!("pipeline: script changed during translation, dropping response");
                    return Err(PodcastError::Discarded);
                };
                let previous = std::mem::replace(&mut result.script, response.translated_script);
                result.original_script = Some(previous);
                result.language = non_empty(response.language).unwrap_or_else(|| target.to_string());
                result.translated = true;
                if result.audio_reference.take().is_some() {
                    log::debug!("pipeline: translation invalidated synthesized audio");
                }
                log::info!("pipeline: script translated to {}", result.language);
                Ok(result.clone())
            }
            Err(e) => Err(record_error(&mut st, e)),
        }
    }

    // -----------------------------------------------------------------------
    // reset
    // -----------------------------------------------------------------------

    /// Discard the result and return every flag to rest.  Responses to calls
    /// still in flight will be dropped when they arrive.
    pub fn reset(&self) {
        lock(&self.session).clear();
        log::debug!("pipeline: session reset");
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_result(
    request: &PodcastRequest,
    response: GenerateResponse,
) -> Result<PodcastResult, PodcastError> {
    if response.script.is_empty() {
        return Err(PodcastError::Generation(ApiFailure::Parse(
            "service returned an empty script".into(),
        )));
    }

    if let Some(status) = response.status.as_deref() {
        log::debug!("pipeline: generate status = {status}");
    }

    let language =
        non_empty(response.language).unwrap_or_else(|| request.language().label().to_string());

    let mut result = PodcastResult::new(request.topic(), language, response.script);
    result.original_script = response.original_script.filter(|s: &Script| !s.is_empty());
    Ok(result)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn record_error(st: &mut SessionState, e: PodcastError) -> PodcastError {
    log::error!("pipeline error: {e}");
    st.last_error = Some(e.to_string());
    e
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
