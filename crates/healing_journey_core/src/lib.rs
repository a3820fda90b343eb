pub mod catalog;
pub mod classifier;
pub mod domain;
pub mod intake;
pub mod journey;
pub mod localization;
pub mod pager;
pub mod ports;
pub mod results;

pub use catalog::TherapyCatalog;
pub use classifier::classify;
pub use domain::{
    AudioCue, CategoryKey, ClassificationResult, Direction, FormData, HealingStep, Intensity,
    IntakeStage, JourneyPhase, Language, QuickPick, StepKind, TherapyRecord, UserRecord,
    UserRecordUpdate,
};
pub use intake::{suggest, IntakeError, IntakeMachine, Suggestion};
pub use journey::{Journey, JourneyError};
pub use localization::{LocaleBundle, LocalizationStore, UiStrings};
pub use pager::{ManualAction, PageState, PageTurn, PagerKey, ResultsPager};
pub use ports::{AmbientAudioService, PortError, PortResult};
pub use results::{Page, RecommendationPage, ResultsBook, StepPage};
