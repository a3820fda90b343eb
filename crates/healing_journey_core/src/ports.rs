//! crates/healing_journey_core/src/ports.rs
//!
//! Defines the service contracts (traits) for collaborators of the journey core.
//! The core never reaches into a collaborator's internals; it only talks to
//! these ports, so any implementation can be injected (and faked in tests).

use async_trait::async_trait;

use crate::domain::AudioCue;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The ambient sound engine.
///
/// It owns its audio resources and their lifecycle. Callers treat every
/// method as fire-and-forget: an `Err` is logged and otherwise ignored, so a
/// missing audio backend never changes journey state.
#[async_trait]
pub trait AmbientAudioService: Send + Sync {
    /// Starts the ambient soundscape. Starting twice is harmless.
    async fn start(&self) -> PortResult<()>;

    /// Stops the ambient soundscape and any of its scheduled sounds.
    async fn stop(&self) -> PortResult<()>;

    fn is_playing(&self) -> bool;

    /// Plays a single one-shot cue.
    async fn play_cue(&self, cue: AudioCue) -> PortResult<()>;
}
