//! services/journey/src/session/protocol.rs
//!
//! Defines the message protocol between a visitor's front end and the journey
//! session host. Both directions are tagged JSON objects, one per line.

use healing_journey_core::{
    domain::{CategoryKey, Direction, FormData, JourneyPhase, Language, QuickPick},
    localization::UiStrings,
    pager::PagerKey,
    results::Page,
};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Visitor TO the Session
//=========================================================================================

/// Everything a visitor can do during a journey.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisitorEvent {
    /// The hero screen's call to action. The consultation opens after a delay.
    StartConsultation,

    /// The condition input changed. The session answers with a suggestion.
    InputChanged { text: String },

    /// Submits the typed condition.
    SubmitCondition { text: String },

    /// Submits the suggestion currently on offer.
    AcceptSuggestion,

    SelectQuickPick { index: usize },

    SubmitForm { form: FormData },

    NextPage,
    PrevPage,
    /// A page-dot click.
    GotoPage { index: usize },
    Key { key: PagerKey },

    /// The pointer entered the book.
    PauseAutoAdvance,
    /// The pointer left the book.
    ResumeAutoAdvance,

    ToggleLanguage,
    ToggleAmbient,

    /// Ends the session.
    Leave,
}

//=========================================================================================
// Messages Sent FROM the Session TO the Visitor
//=========================================================================================

/// What the front end should render next.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JourneyUpdate {
    /// First message of every session: the hero screen and all display copy.
    SessionStarted {
        language: Language,
        strings: UiStrings,
    },

    /// The consultation panel is open; the quick-picks are in the current language.
    ConsultationOpened { quick_picks: Vec<QuickPick> },

    /// The current type-ahead suggestion. `None` clears it.
    Suggestion { text: Option<String> },

    /// The condition was accepted and is being analyzed.
    Analyzing { condition: String },

    /// Analysis finished; the booking form should show.
    FormRequested { condition: String },

    /// The form was refused. Lists the blank required fields.
    FormRejected { missing: Vec<String> },

    PhaseChanged { phase: JourneyPhase },

    /// One line of the transition sequence.
    Whisper {
        index: usize,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        dedication: Option<String>,
    },

    /// The results book is ready.
    ResultsReady {
        total_pages: usize,
        category: CategoryKey,
    },

    /// The page now on display.
    PageShown {
        index: usize,
        direction: Direction,
        page: Page,
        /// `true` when auto-advance turned the page.
        auto: bool,
    },

    /// Auto-advance reached the last page and will not run again.
    AutoAdvanceStopped,

    /// The display copy in the new language.
    LanguageChanged {
        language: Language,
        strings: UiStrings,
    },

    AmbientChanged { playing: bool },
}
