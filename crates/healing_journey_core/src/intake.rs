//! crates/healing_journey_core/src/intake.rs
//!
//! The consultation state machine: `Input -> Analyzing -> Form -> Completed`.
//!
//! The machine only validates and records; the dwell in `Analyzing` is timed by
//! whoever drives it, which calls [`IntakeMachine::finish_analysis`] when the
//! delay elapses.

use tracing::{debug, info};

use crate::classifier::classify;
use crate::domain::{
    ClassificationResult, FormData, IntakeStage, Language, QuickPick, UserRecordUpdate,
};

/// Why an intake action was refused. The machine's state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Condition text is empty")]
    EmptyCondition,
    #[error("Intake is in the {actual} stage, expected {expected}")]
    WrongStage {
        expected: IntakeStage,
        actual: IntakeStage,
    },
    #[error("Required field(s) missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("No quick-pick at index {0}")]
    UnknownQuickPick(usize),
}

#[derive(Debug, Clone)]
pub struct IntakeMachine {
    stage: IntakeStage,
    condition: Option<String>,
    classification: Option<ClassificationResult>,
}

impl Default for IntakeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeMachine {
    pub fn new() -> Self {
        Self {
            stage: IntakeStage::Input,
            condition: None,
            classification: None,
        }
    }

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.classification.as_ref()
    }

    fn expect_stage(&self, expected: IntakeStage) -> Result<(), IntakeError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(IntakeError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    /// Accepts the visitor's complaint and classifies it once.
    ///
    /// Moves `Input -> Analyzing`. A second submission while already analyzing
    /// is refused with `WrongStage`, which also guards against double submits.
    pub fn submit_text(
        &mut self,
        text: &str,
        lang: Language,
    ) -> Result<&ClassificationResult, IntakeError> {
        self.expect_stage(IntakeStage::Input)?;
        let condition = text.trim();
        if condition.is_empty() {
            return Err(IntakeError::EmptyCondition);
        }

        let result = classify(condition, lang);
        info!(key = %result.key, score = result.score, "Condition submitted.");
        self.condition = Some(condition.to_string());
        self.stage = IntakeStage::Analyzing;
        Ok(&*self.classification.insert(result))
    }

    /// Submits one of the offered quick-picks. It goes through the classifier
    /// like any typed text.
    pub fn select_quick_pick(
        &mut self,
        picks: &[QuickPick],
        index: usize,
        lang: Language,
    ) -> Result<&ClassificationResult, IntakeError> {
        let pick = picks.get(index).ok_or(IntakeError::UnknownQuickPick(index))?;
        let text = pick.text.replacen('?', "", 1);
        self.submit_text(&text, lang)
    }

    /// Ends the analyzing dwell. Moves `Analyzing -> Form`.
    pub fn finish_analysis(&mut self) -> Result<(), IntakeError> {
        self.expect_stage(IntakeStage::Analyzing)?;
        self.stage = IntakeStage::Form;
        debug!("Analysis finished, showing reservation form.");
        Ok(())
    }

    /// Validates the booking form and, if complete, emits the visitor's record.
    ///
    /// Moves `Form -> Completed`; the machine accepts nothing afterwards.
    pub fn submit_form(&mut self, form: FormData) -> Result<UserRecordUpdate, IntakeError> {
        self.expect_stage(IntakeStage::Form)?;
        let missing = form.missing_required();
        if !missing.is_empty() {
            return Err(IntakeError::MissingFields(missing));
        }

        let form = FormData {
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form
                .email
                .map(|email| email.trim().to_string())
                .filter(|email| !email.is_empty()),
            intensity: form.intensity,
        };
        self.stage = IntakeStage::Completed;
        info!(intensity = ?form.intensity, "Reservation form completed.");

        Ok(UserRecordUpdate {
            name: Some(form.name.clone()),
            condition: self.condition.clone(),
            messages: Vec::new(),
            form_data: Some(form),
            classification: self.classification.clone(),
        })
    }
}

//=========================================================================================
// Type-ahead Suggestions
//=========================================================================================

/// What the input box offers while the visitor types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    QuickPick { index: usize, text: String },
    Custom { text: String },
}

impl Suggestion {
    pub fn text(&self) -> &str {
        match self {
            Suggestion::QuickPick { text, .. } | Suggestion::Custom { text } => text,
        }
    }

    /// The text submitted when the suggestion is accepted: the first `?`
    /// is dropped, any others are the visitor's own.
    pub fn submission_text(&self) -> String {
        self.text().replacen('?', "", 1)
    }
}

/// The first quick-pick with a keyword inside the typed text, otherwise the
/// typed text itself phrased as a question. Blank input suggests nothing.
pub fn suggest(input: &str, picks: &[QuickPick]) -> Option<Suggestion> {
    let lowered = input.to_lowercase();
    if lowered.trim().is_empty() {
        return None;
    }

    let found = picks.iter().enumerate().find(|(_, pick)| {
        pick.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    });

    Some(match found {
        Some((index, pick)) => Suggestion::QuickPick {
            index,
            text: pick.text.clone(),
        },
        None => Suggestion::Custom {
            text: format!("{}?", input),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryKey, Intensity};
    use crate::localization::LocalizationStore;

    fn machine_in_form() -> IntakeMachine {
        let mut machine = IntakeMachine::new();
        machine
            .submit_text("I have pain in my back and neck", Language::En)
            .unwrap();
        machine.finish_analysis().unwrap();
        machine
    }

    #[test]
    fn blank_submission_stays_in_input() {
        let mut machine = IntakeMachine::new();
        assert_eq!(
            machine.submit_text("   ", Language::En).unwrap_err(),
            IntakeError::EmptyCondition
        );
        assert_eq!(machine.stage(), IntakeStage::Input);
        assert!(machine.condition().is_none());
    }

    #[test]
    fn submission_classifies_and_moves_to_analyzing() {
        let mut machine = IntakeMachine::new();
        let key = machine
            .submit_text("  neck pain ", Language::En)
            .unwrap()
            .key;
        assert_eq!(key, CategoryKey::EnergyReset);
        assert_eq!(machine.stage(), IntakeStage::Analyzing);
        assert_eq!(machine.condition(), Some("neck pain"));
    }

    #[test]
    fn second_submission_while_analyzing_is_ignored() {
        let mut machine = IntakeMachine::new();
        machine.submit_text("neck pain", Language::En).unwrap();
        let err = machine.submit_text("romantic couple", Language::En).unwrap_err();
        assert!(matches!(err, IntakeError::WrongStage { .. }));
        assert_eq!(machine.condition(), Some("neck pain"));
        assert_eq!(
            machine.classification().map(|c| c.key),
            Some(CategoryKey::EnergyReset)
        );
    }

    #[test]
    fn form_cannot_be_submitted_before_analysis_ends() {
        let mut machine = IntakeMachine::new();
        machine.submit_text("neck pain", Language::En).unwrap();
        assert!(machine
            .submit_form(FormData::new("Lan", "0987654321"))
            .is_err());
        assert_eq!(machine.stage(), IntakeStage::Analyzing);
    }

    #[test]
    fn form_without_name_is_rejected() {
        let mut machine = machine_in_form();
        let err = machine
            .submit_form(FormData::new("", "0987654321"))
            .unwrap_err();
        assert_eq!(err, IntakeError::MissingFields(vec!["name"]));
        assert_eq!(machine.stage(), IntakeStage::Form);
    }

    #[test]
    fn complete_form_emits_the_record() {
        let mut machine = machine_in_form();
        let form = FormData {
            name: " Lan ".into(),
            phone: "0987654321".into(),
            email: Some("  ".into()),
            intensity: Intensity::Severe,
        };
        let update = machine.submit_form(form).unwrap();

        assert_eq!(machine.stage(), IntakeStage::Completed);
        assert_eq!(update.name.as_deref(), Some("Lan"));
        assert_eq!(
            update.condition.as_deref(),
            Some("I have pain in my back and neck")
        );
        assert!(update.messages.is_empty());
        let form = update.form_data.unwrap();
        assert_eq!(form.email, None);
        assert_eq!(form.intensity, Intensity::Severe);
        assert_eq!(update.classification.unwrap().key, CategoryKey::EnergyReset);

        assert!(machine.submit_form(FormData::new("Lan", "0901")).is_err());
    }

    #[test]
    fn quick_pick_is_reclassified_from_its_text() {
        let store = LocalizationStore::new();
        let picks = &store.get(Language::En).quick_picks;
        let mut machine = IntakeMachine::new();
        let result = machine.select_quick_pick(picks, 1, Language::En).unwrap();
        assert_eq!(result.key, CategoryKey::JetlagRecovery);
        assert_eq!(machine.condition(), Some("Trouble Sleeping"));

        let mut other = IntakeMachine::new();
        assert_eq!(
            other.select_quick_pick(picks, 9, Language::En).unwrap_err(),
            IntakeError::UnknownQuickPick(9)
        );
    }

    #[test]
    fn accepting_a_custom_suggestion_drops_only_one_question_mark() {
        let suggestion = suggest("why so tired?", &[]).unwrap();
        assert_eq!(suggestion.text(), "why so tired??");
        assert_eq!(suggestion.submission_text(), "why so tired?");
    }

    #[test]
    fn suggestion_prefers_the_first_matching_quick_pick() {
        let store = LocalizationStore::new();
        let picks = &store.get(Language::En).quick_picks;

        let first = suggest("Ne", picks).unwrap();
        assert_eq!(
            first,
            Suggestion::QuickPick {
                index: 0,
                text: "Neck & Shoulder Pain?".into()
            }
        );
        assert_eq!(first.submission_text(), "Neck & Shoulder Pain");

        // "s" is a prefix of both sleeping and stress; sleeping comes first.
        assert!(matches!(
            suggest("s", picks),
            Some(Suggestion::QuickPick { index: 1, .. })
        ));
    }

    #[test]
    fn suggestion_falls_back_to_the_typed_text() {
        let store = LocalizationStore::new();
        let picks = &store.get(Language::En).quick_picks;
        assert_eq!(
            suggest("hi", picks),
            Some(Suggestion::Custom { text: "hi?".into() })
        );
        assert_eq!(suggest("   ", picks), None);
    }

    #[test]
    fn vietnamese_suggestions_match_diacritics() {
        let store = LocalizationStore::new();
        let picks = &store.get(Language::Vi).quick_picks;
        assert!(matches!(
            suggest("Đau lưng", picks),
            Some(Suggestion::QuickPick { index: 0, .. })
        ));
    }
}
