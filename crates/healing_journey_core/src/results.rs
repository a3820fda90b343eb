//! crates/healing_journey_core/src/results.rs
//!
//! Renders the results book for a visitor: the localized healing steps, with
//! the empathy page personalized from their condition, followed by the
//! recommendation page for the category that was classified during intake.

use serde::Serialize;

use crate::domain::{CategoryKey, StepKind, TherapyRecord, UserRecord};
use crate::localization::LocaleBundle;

/// Longest stretch of the visitor's own words quoted back on the empathy page.
const CONDITION_QUOTE_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepPage {
    pub kind: StepKind,
    pub badge: String,
    pub title: String,
    pub description: String,
    pub detail: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationPage {
    pub category: CategoryKey,
    pub greeting: String,
    pub subtitle: String,
    pub therapy: TherapyRecord,
    pub intensity_label: String,
    pub intensity: String,
    pub duration_label: String,
    pub contact_label: String,
    pub contact: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Page {
    Step(StepPage),
    Recommendation(RecommendationPage),
}

/// All pages of the results book, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsBook {
    pub pages: Vec<Page>,
}

impl ResultsBook {
    /// Builds the book from the finished record. Reads the stored
    /// classification; the condition is never classified again here.
    pub fn render(record: &UserRecord, bundle: &LocaleBundle) -> Self {
        let strings = &bundle.strings;
        let mut pages: Vec<Page> = bundle
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let badge = match step.kind {
                    StepKind::Empathy => strings.badge_empathy.clone(),
                    StepKind::Result => strings.badge_result.clone(),
                    StepKind::Solution => format!("{} {}", strings.badge_step, index),
                };
                let description = if step.kind == StepKind::Empathy && !record.condition.is_empty()
                {
                    format!(
                        "{} {}...",
                        strings.condition_prefix,
                        quote_condition(&record.condition)
                    )
                } else {
                    step.description.clone()
                };
                Page::Step(StepPage {
                    kind: step.kind,
                    badge,
                    title: step.title.clone(),
                    description,
                    detail: step.detail.clone(),
                    duration: step.duration.clone(),
                })
            })
            .collect();

        let category = record
            .classification
            .as_ref()
            .map(|result| result.key)
            .unwrap_or_default();
        let greeting = if record.name.is_empty() {
            format!("{},", strings.rec_welcome)
        } else {
            format!("{} {},", strings.rec_welcome, record.name)
        };

        pages.push(Page::Recommendation(RecommendationPage {
            category,
            greeting,
            subtitle: strings.rec_subtitle.clone(),
            therapy: bundle.therapy(category).clone(),
            intensity_label: strings.rec_intensity.clone(),
            intensity: strings.intensity_label(record.intensity()).to_string(),
            duration_label: strings.rec_duration.clone(),
            contact_label: strings.rec_contact.clone(),
            contact: strings.contact_line.clone(),
            call_to_action: strings.rec_cta.clone(),
        }));

        Self { pages }
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn quote_condition(condition: &str) -> String {
    condition
        .to_lowercase()
        .chars()
        .take(CONDITION_QUOTE_CHARS)
        .collect()
}
