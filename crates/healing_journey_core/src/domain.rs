//! crates/healing_journey_core/src/domain.rs
//!
//! Defines the pure, core data structures for the healing journey.
//! These structs are independent of any runtime, timer or rendering layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Language and Category Keys
//=========================================================================================

/// The display languages the journey is localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Vi];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
        }
    }

    /// The other supported language (en <-> vi).
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Vi,
            Language::Vi => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "vi" => Ok(Language::Vi),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// The fixed therapy classification labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    EnergyReset,
    JetlagRecovery,
    SilentHealing,
    CoupleHealing,
    #[default]
    Default,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::EnergyReset,
        CategoryKey::JetlagRecovery,
        CategoryKey::SilentHealing,
        CategoryKey::CoupleHealing,
        CategoryKey::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::EnergyReset => "energy-reset",
            CategoryKey::JetlagRecovery => "jetlag-recovery",
            CategoryKey::SilentHealing => "silent-healing",
            CategoryKey::CoupleHealing => "couple-healing",
            CategoryKey::Default => "default",
        }
    }

    /// Parses a category key, resolving anything unknown to `Default`.
    pub fn from_key_lossy(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category key: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryKey {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

//=========================================================================================
// Visitor Data
//=========================================================================================

/// How strongly the visitor feels their complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(Intensity::Mild),
            "moderate" => Ok(Intensity::Moderate),
            "severe" => Ok(Intensity::Severe),
            other => Err(format!("'{}' is not a valid intensity", other)),
        }
    }
}

/// Booking contact fields collected at the end of the consultation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub intensity: Intensity,
}

impl FormData {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Required fields that are blank after trimming, in form order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

/// The outcome of classifying one complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub key: CategoryKey,
    pub score: u32,
    pub matched: BTreeSet<String>,
}

impl ClassificationResult {
    /// The result for input that hit no keyword at all.
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn is_default(&self) -> bool {
        self.key == CategoryKey::Default
    }
}

/// Everything accumulated about the visitor across the journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub name: String,
    pub condition: String,
    pub messages: Vec<String>,
    pub form_data: Option<FormData>,
    pub classification: Option<ClassificationResult>,
}

/// A partial update emitted when a phase completes.
/// `None` fields leave the accumulated value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecordUpdate {
    pub name: Option<String>,
    pub condition: Option<String>,
    pub messages: Vec<String>,
    pub form_data: Option<FormData>,
    pub classification: Option<ClassificationResult>,
}

impl UserRecord {
    /// Folds a phase's update into the record.
    ///
    /// An empty string never clears a non-empty value that an earlier phase
    /// supplied, and messages are appended rather than replaced.
    pub fn merge(&mut self, update: UserRecordUpdate) {
        if let Some(name) = update.name {
            if !name.is_empty() || self.name.is_empty() {
                self.name = name;
            }
        }
        if let Some(condition) = update.condition {
            if !condition.is_empty() || self.condition.is_empty() {
                self.condition = condition;
            }
        }
        self.messages.extend(update.messages);
        if update.form_data.is_some() {
            self.form_data = update.form_data;
        }
        if update.classification.is_some() {
            self.classification = update.classification;
        }
    }

    /// The chosen intensity, or the form's default when no form was filled in.
    pub fn intensity(&self) -> Intensity {
        self.form_data
            .as_ref()
            .map(|form| form.intensity)
            .unwrap_or_default()
    }
}

//=========================================================================================
// Catalog and Content Records
//=========================================================================================

/// A bookable treatment recommended for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TherapyRecord {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Empathy,
    Solution,
    Result,
}

/// One fixed content page of the results book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealingStep {
    pub kind: StepKind,
    pub title: String,
    pub description: String,
    pub detail: String,
    pub duration: Option<String>,
}

/// A pre-written complaint offered as a one-click shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickPick {
    pub id: String,
    pub text: String,
    /// Prefixes that surface this pick while the visitor is still typing.
    pub keywords: Vec<String>,
}

//=========================================================================================
// Phases, Pages and Cues
//=========================================================================================

/// The three macro phases of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyPhase {
    Intake,
    Transition,
    Results,
}

impl fmt::Display for JourneyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JourneyPhase::Intake => "intake",
            JourneyPhase::Transition => "transition",
            JourneyPhase::Results => "results",
        };
        f.write_str(label)
    }
}

/// The stages of the consultation inside the intake phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    Input,
    Analyzing,
    Form,
    Completed,
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntakeStage::Input => "input",
            IntakeStage::Analyzing => "analyzing",
            IntakeStage::Form => "form",
            IntakeStage::Completed => "completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Named one-shot sounds the ambient engine can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    PageTurn,
    Chirp,
    LeafRustle,
}
