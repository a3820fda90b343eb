//! crates/healing_journey_core/src/journey.rs
//!
//! The top-level phase progression `Intake -> Transition -> Results` and the
//! single visitor record threaded through it.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::{JourneyPhase, UserRecord, UserRecordUpdate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("Cannot move from the {from} phase to the {to} phase")]
    OutOfOrder { from: JourneyPhase, to: JourneyPhase },
}

/// One visitor session. Phases only ever move forward.
#[derive(Debug, Clone)]
pub struct Journey {
    id: Uuid,
    started_at: DateTime<Utc>,
    phase: JourneyPhase,
    record: UserRecord,
}

impl Default for Journey {
    fn default() -> Self {
        Self::new()
    }
}

impl Journey {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            phase: JourneyPhase::Intake,
            record: UserRecord::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }

    fn advance(&mut self, from: JourneyPhase, to: JourneyPhase) -> Result<(), JourneyError> {
        if self.phase != from {
            return Err(JourneyError::OutOfOrder {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        info!(journey_id = %self.id, phase = %to, "Journey phase changed.");
        Ok(())
    }

    /// Takes the intake's emitted record and enters the transition.
    pub fn complete_intake(&mut self, update: UserRecordUpdate) -> Result<(), JourneyError> {
        self.advance(JourneyPhase::Intake, JourneyPhase::Transition)?;
        self.record.merge(update);
        Ok(())
    }

    /// Ends the transition. The record is read-only from here on.
    pub fn complete_transition(&mut self) -> Result<&UserRecord, JourneyError> {
        self.advance(JourneyPhase::Transition, JourneyPhase::Results)?;
        Ok(&self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormData, Language};
    use crate::intake::IntakeMachine;

    fn intake_update() -> UserRecordUpdate {
        let mut intake = IntakeMachine::new();
        intake
            .submit_text("tôi mất ngủ và mệt mỏi", Language::Vi)
            .unwrap();
        intake.finish_analysis().unwrap();
        intake
            .submit_form(FormData::new("Minh", "0987654321"))
            .unwrap()
    }

    #[test]
    fn phases_move_strictly_forward() {
        let mut journey = Journey::new();
        assert_eq!(journey.phase(), JourneyPhase::Intake);
        assert!(journey.complete_transition().is_err());

        journey.complete_intake(intake_update()).unwrap();
        assert_eq!(journey.phase(), JourneyPhase::Transition);
        assert_eq!(
            journey.complete_intake(intake_update()),
            Err(JourneyError::OutOfOrder {
                from: JourneyPhase::Transition,
                to: JourneyPhase::Transition
            })
        );

        journey.complete_transition().unwrap();
        assert_eq!(journey.phase(), JourneyPhase::Results);
        assert!(journey.complete_transition().is_err());
    }

    #[test]
    fn results_see_everything_the_intake_supplied() {
        let mut journey = Journey::new();
        journey.complete_intake(intake_update()).unwrap();
        let record = journey.complete_transition().unwrap();

        assert_eq!(record.name, "Minh");
        assert_eq!(record.condition, "tôi mất ngủ và mệt mỏi");
        assert!(record.messages.is_empty());
        assert_eq!(record.form_data.as_ref().unwrap().phone, "0987654321");
        assert!(record.classification.is_some());
    }
}
