//! services/journey/src/bin/journey.rs
//!
//! Hosts one journey session over stdin/stdout: visitor events arrive as JSON
//! lines on stdin, journey updates leave as JSON lines on stdout, and logs go
//! to stderr.

use healing_journey_core::ports::AmbientAudioService;
use journey_lib::{
    adapters::{SilentAmbientAdapter, TracingAmbientAdapter},
    config::Config,
    error::AppError,
    session::{run_session, AppState, JourneyUpdate, VisitorEvent},
};
use std::io::BufRead;
use std::sync::Arc;
use tokio::{io::AsyncWriteExt, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(language = %config.language, "Configuration loaded. Starting journey...");

    // --- 2. Initialize the Ambient Audio Adapter ---
    let ambient: Arc<dyn AmbientAudioService> = if config.ambient_audio {
        Arc::new(TracingAmbientAdapter::new())
    } else {
        info!("Ambient audio disabled.");
        Arc::new(SilentAmbientAdapter)
    };
    let app_state = Arc::new(AppState::new(config, ambient));

    // --- 3. Wire the Visitor Streams ---
    let shutdown = CancellationToken::new();
    let (event_tx, event_rx) = mpsc::channel::<VisitorEvent>(32);
    let (update_tx, mut update_rx) = mpsc::channel::<JourneyUpdate>(32);

    // Stdin is read on its own OS thread: a blocked read there never holds
    // up process exit. A spare sender keeps the session's event stream open
    // after stdin closes, so pending timers still run until leave or ctrl-c.
    let event_keepalive = event_tx.clone();
    std::thread::spawn(move || read_visitor_events(event_tx));

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(update) = update_rx.recv().await {
            let mut json = serde_json::to_string(&update)?;
            json.push('\n');
            stdout.write_all(json.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<(), AppError>(())
    });

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, shutting down.");
                shutdown.cancel();
            }
        });
    }

    // --- 4. Run the Journey ---
    let result = run_session(app_state, event_rx, update_tx, shutdown.clone()).await;
    shutdown.cancel();
    drop(event_keepalive);

    match writer.await {
        Ok(Err(e)) => warn!("Failed to deliver journey updates: {}", e),
        Err(e) => warn!("Update writer task failed: {}", e),
        Ok(Ok(())) => {}
    }

    let record = result?;
    info!(
        name = %record.name,
        category = ?record.classification.as_ref().map(|c| c.key),
        "Journey finished."
    );
    Ok(())
}

/// Forwards visitor events from stdin, one JSON object per line.
fn read_visitor_events(event_tx: mpsc::Sender<VisitorEvent>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read visitor input: {}", e);
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<VisitorEvent>(&line) {
            Ok(event) => {
                if event_tx.blocking_send(event).is_err() {
                    return;
                }
            }
            Err(e) => warn!("Ignoring malformed visitor event: {}", e),
        }
    }
    info!("Visitor input closed.");
}
