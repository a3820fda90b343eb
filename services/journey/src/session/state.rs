//! services/journey/src/session/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use healing_journey_core::{
    intake::{IntakeMachine, Suggestion},
    journey::Journey,
    localization::{LocaleBundle, LocalizationStore},
    pager::ResultsPager,
    ports::AmbientAudioService,
    results::ResultsBook,
    Language,
};
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

//=========================================================================================
// AppState (Shared Across All Sessions)
//=========================================================================================

/// The shared application state, created once at startup and passed to every session.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ambient: Arc<dyn AmbientAudioService>,
    pub locales: Arc<LocalizationStore>,
}

impl AppState {
    pub fn new(config: Config, ambient: Arc<dyn AmbientAudioService>) -> Self {
        Self {
            config: Arc::new(config),
            ambient,
            locales: Arc::new(LocalizationStore::new()),
        }
    }
}

//=========================================================================================
// SessionState (Specific to One Visitor)
//=========================================================================================

/// The delayed steps a session can schedule. Only one is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    OpenConsultation,
    FinishAnalysis,
    /// Shows transition whisper `n`.
    Whisper(usize),
    FinishTransition,
    AutoAdvance,
}

#[derive(Debug, Clone, Copy)]
pub struct PendingTimer {
    pub kind: TimerKind,
    pub deadline: Instant,
}

/// The state for a single visitor's journey.
pub struct SessionState {
    pub language: Language,
    pub journey: Journey,
    pub consultation_requested: bool,
    pub consultation_open: bool,
    pub intake: IntakeMachine,
    /// The suggestion `AcceptSuggestion` would submit.
    pub suggestion: Option<Suggestion>,
    pub pager: Option<ResultsPager>,
    pub book: Option<ResultsBook>,
    /// The single pending delayed step. Replacing or clearing it cancels the old one.
    pub timer: Option<PendingTimer>,
    /// Cancels in-flight cue tasks when the session ends.
    pub cue_token: CancellationToken,
}

impl SessionState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            journey: Journey::new(),
            consultation_requested: false,
            consultation_open: false,
            intake: IntakeMachine::new(),
            suggestion: None,
            pager: None,
            book: None,
            timer: None,
            cue_token: CancellationToken::new(),
        }
    }

    pub fn locale<'a>(&self, app_state: &'a AppState) -> &'a LocaleBundle {
        app_state.locales.get(self.language)
    }

    /// Schedules `kind` after `delay`, replacing whatever was pending.
    pub fn arm(&mut self, kind: TimerKind, delay: std::time::Duration) {
        self.timer = Some(PendingTimer {
            kind,
            deadline: Instant::now() + delay,
        });
    }

    /// Drops the pending timer if it is of `kind`.
    pub fn disarm(&mut self, kind: TimerKind) {
        if self.timer.map(|t| t.kind) == Some(kind) {
            self.timer = None;
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.deadline)
    }
}
