//! services/journey/src/adapters/ambient.rs
//!
//! An ambient sound engine that renders its soundscape as structured log
//! events. It implements the `AmbientAudioService` port from the `core` crate
//! and keeps the same schedule a speaker-backed engine would: a background
//! loop that drops water and rustles leaves at random intervals while playing.

use async_trait::async_trait;
use healing_journey_core::{
    domain::AudioCue,
    ports::{AmbientAudioService, PortResult},
};
use rand::Rng;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shortest pause between two background sounds.
const MIN_SOUND_GAP_MS: u64 = 1500;
/// Random extra pause added on top of [`MIN_SOUND_GAP_MS`].
const SOUND_GAP_SPREAD_MS: u64 = 2000;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Implements `AmbientAudioService` by emitting `tracing` events.
#[derive(Default)]
pub struct TracingAmbientAdapter {
    playing: AtomicBool,
    /// Stops the background loop of the current soundscape, if any.
    loop_token: Mutex<Option<CancellationToken>>,
}

impl TracingAmbientAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn replace_loop(&self, token: Option<CancellationToken>) {
        let mut slot = self
            .loop_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = std::mem::replace(&mut *slot, token) {
            previous.cancel();
        }
    }
}

impl Drop for TracingAmbientAdapter {
    fn drop(&mut self) {
        self.replace_loop(None);
    }
}

//=========================================================================================
// `AmbientAudioService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AmbientAudioService for TracingAmbientAdapter {
    async fn start(&self) -> PortResult<()> {
        if self.playing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        info!("Ambient soundscape started (forest, birds, water).");

        let token = CancellationToken::new();
        self.replace_loop(Some(token.clone()));
        tokio::spawn(ambient_loop(token));
        Ok(())
    }

    async fn stop(&self) -> PortResult<()> {
        if self.playing.swap(false, Ordering::SeqCst) {
            info!("Ambient soundscape stopped.");
        }
        self.replace_loop(None);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    async fn play_cue(&self, cue: AudioCue) -> PortResult<()> {
        info!(cue = ?cue, "Playing cue.");
        Ok(())
    }
}

/// Background sounds of the soundscape. Runs until the token is cancelled.
async fn ambient_loop(token: CancellationToken) {
    loop {
        let (gap, roll) = {
            let mut rng = rand::thread_rng();
            (
                MIN_SOUND_GAP_MS + rng.gen_range(0..SOUND_GAP_SPREAD_MS),
                rng.gen::<f64>(),
            )
        };

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_millis(gap)) => {}
        }

        if roll < 0.4 {
            debug!(cue = ?AudioCue::Chirp, "Ambient: water drop.");
        } else if roll < 0.65 {
            debug!(cue = ?AudioCue::LeafRustle, "Ambient: leaves rustle.");
        }
    }
    debug!("Ambient loop ended.");
}
