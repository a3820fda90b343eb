//! services/journey/src/session/cues.rs
//!
//! Fire-and-forget page-turn sounds: the page rustle right away, then a bird
//! chirp after a short random delay. Neither ever blocks the control loop.

use crate::config::Timings;
use healing_journey_core::{domain::AudioCue, ports::AmbientAudioService};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A delay drawn uniformly from the configured jitter window.
pub fn chirp_delay(timings: &Timings) -> Duration {
    let min = timings.cue_jitter_min.as_millis() as u64;
    let max = timings.cue_jitter_max.as_millis() as u64;
    if max <= min {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}

/// Spawns the cue pair for one page turn. The chirp is dropped if `token` is
/// cancelled before it is due.
pub fn play_page_turn(
    ambient: Arc<dyn AmbientAudioService>,
    timings: &Timings,
    token: CancellationToken,
) {
    let delay = chirp_delay(timings);
    tokio::spawn(async move {
        if let Err(e) = ambient.play_cue(AudioCue::PageTurn).await {
            warn!("Page-turn cue failed: {}", e);
        }

        tokio::select! {
            _ = token.cancelled() => {
                debug!("Session ended before the chirp; dropping it.");
            }
            _ = tokio::time::sleep(delay) => {
                if let Err(e) = ambient.play_cue(AudioCue::Chirp).await {
                    warn!("Chirp cue failed: {}", e);
                }
            }
        }
    });
}
