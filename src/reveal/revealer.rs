//! Typewriter-style reveal of a finished text.
//!
//! [`start_reveal`] spawns a tokio task that advances a [`RevealState`] every
//! `tick_interval` and publishes it over a `watch` channel.  The task stops
//! on its own once the whole text is revealed, or earlier when its
//! [`CancellationToken`] fires.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::RevealConfig;

// ---------------------------------------------------------------------------
// RevealState
// ---------------------------------------------------------------------------

/// Progress of one reveal session.
///
/// Lengths count Unicode scalar values, so a tick never splits a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    source_text: String,
    total_len: usize,
    revealed_len: usize,
    ticks: usize,
    is_complete: bool,
}

impl RevealState {
    fn new(source_text: &str) -> Self {
        let total_len = source_text.chars().count();
        Self {
            source_text: source_text.to_string(),
            total_len,
            revealed_len: 0,
            ticks: 0,
            is_complete: total_len == 0,
        }
    }

    /// Apply one tick.  No-op once complete.
    fn advance(&mut self, chars_per_tick: usize) {
        if self.is_complete {
            return;
        }
        self.revealed_len = (self.revealed_len + chars_per_tick).min(self.total_len);
        self.ticks += 1;
        if self.revealed_len == self.total_len {
            self.is_complete = true;
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Length of the source text in characters.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_len
    }

    /// Ticks applied so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// The revealed prefix of the source text.
    pub fn revealed_text(&self) -> &str {
        let end = self
            .source_text
            .char_indices()
            .nth(self.revealed_len)
            .map(|(i, _)| i)
            .unwrap_or(self.source_text.len());
        &self.source_text[..end]
    }
}

// ---------------------------------------------------------------------------
// RevealHandle
// ---------------------------------------------------------------------------

/// Handle to a running (or finished) reveal session.
///
/// Dropping the handle cancels the session.
pub struct RevealHandle {
    state: watch::Receiver<RevealState>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevealHandle {
    /// Snapshot of the current progress.
    pub fn state(&self) -> RevealState {
        self.state.borrow().clone()
    }

    pub fn revealed_text(&self) -> String {
        self.state.borrow().revealed_text().to_string()
    }

    pub fn source_text(&self) -> String {
        self.state.borrow().source_text().to_string()
    }

    pub fn is_complete(&self) -> bool {
        self.state.borrow().is_complete()
    }

    /// Stop ticking.  Safe to call any number of times, including after
    /// completion.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A clone of the token that stops this session.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// `true` while the tick task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the next published state.  Returns `None` once the session
    /// has ended and its final state has been observed.
    pub async fn next_update(&mut self) -> Option<RevealState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Wait until the reveal completes or is cancelled, and return the state
    /// it ended in.
    pub async fn finished(&mut self) -> RevealState {
        let _ = self.state.wait_for(RevealState::is_complete).await;
        self.state()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl std::fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealHandle")
            .field("state", &*self.state.borrow())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// start_reveal
// ---------------------------------------------------------------------------

/// Start revealing `text`, `chars_per_tick` characters every
/// `tick_interval`.
///
/// Must be called from within a tokio runtime.  An empty `text` returns an
/// already-complete handle without spawning anything.  A `chars_per_tick`
/// of zero is treated as one and a zero `tick_interval` as one millisecond.
pub fn start_reveal(text: &str, chars_per_tick: usize, tick_interval: Duration) -> RevealHandle {
    let tick_interval = tick_interval.max(Duration::from_millis(1));
    let initial = RevealState::new(text);
    let token = CancellationToken::new();

    if initial.is_complete() {
        let (_tx, rx) = watch::channel(initial);
        return RevealHandle {
            state: rx,
            token,
            task: None,
        };
    }

    let (tx, rx) = watch::channel(initial);
    let first_tick = tokio::time::Instant::now() + tick_interval;
    let task = tokio::spawn(run_ticks(
        tx,
        token.clone(),
        chars_per_tick.max(1),
        first_tick,
        tick_interval,
    ));

    RevealHandle {
        state: rx,
        token,
        task: Some(task),
    }
}

async fn run_ticks(
    tx: watch::Sender<RevealState>,
    token: CancellationToken,
    chars_per_tick: usize,
    first_tick: tokio::time::Instant,
    tick_interval: Duration,
) {
    // Paced from the moment the reveal was requested, not from when the
    // task is first polled.
    let mut ticker = tokio::time::interval_at(first_tick, tick_interval);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("reveal: cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let mut complete = false;
        tx.send_modify(|state| {
            state.advance(chars_per_tick);
            complete = state.is_complete();
        });

        if complete {
            log::debug!("reveal: complete after {} ticks", tx.borrow().ticks());
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Revealer
// ---------------------------------------------------------------------------

/// Owns at most one reveal session at a time.
///
/// Revealing a new text cancels the previous session first, so two tickers
/// never drive the same display.
#[derive(Debug)]
pub struct Revealer {
    chars_per_tick: usize,
    tick_interval: Duration,
    current: Option<RevealHandle>,
}

impl Revealer {
    pub fn new(chars_per_tick: usize, tick_interval: Duration) -> Self {
        Self {
            chars_per_tick: chars_per_tick.max(1),
            tick_interval,
            current: None,
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.chars_per_tick, config.tick_interval())
    }

    /// Start revealing `text`.  The same text while its session is still
    /// live keeps that session.
    pub fn reveal(&mut self, text: &str) -> &mut RevealHandle {
        let keep = matches!(
            &self.current,
            Some(current) if !current.is_cancelled() && current.source_text() == text
        );
        if !keep {
            self.cancel();
        }

        let (chars_per_tick, tick_interval) = (self.chars_per_tick, self.tick_interval);
        self.current
            .get_or_insert_with(|| start_reveal(text, chars_per_tick, tick_interval))
    }

    pub fn current(&self) -> Option<&RevealHandle> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut RevealHandle> {
        self.current.as_mut()
    }

    /// Cancel and forget the current session, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
