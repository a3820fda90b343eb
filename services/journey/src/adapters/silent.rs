//! services/journey/src/adapters/silent.rs
//!
//! The adapter used when ambient audio is switched off or no sound backend
//! exists. Every call fails with `Unavailable`; callers log and carry on.

use async_trait::async_trait;
use healing_journey_core::{
    domain::AudioCue,
    ports::{AmbientAudioService, PortError, PortResult},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAmbientAdapter;

#[async_trait]
impl AmbientAudioService for SilentAmbientAdapter {
    async fn start(&self) -> PortResult<()> {
        Err(PortError::Unavailable("ambient audio is disabled".to_string()))
    }

    async fn stop(&self) -> PortResult<()> {
        Ok(())
    }

    fn is_playing(&self) -> bool {
        false
    }

    async fn play_cue(&self, cue: AudioCue) -> PortResult<()> {
        Err(PortError::Unavailable(format!(
            "ambient audio is disabled, dropped {:?}",
            cue
        )))
    }
}
