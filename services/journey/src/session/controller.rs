//! services/journey/src/session/controller.rs
//!
//! This is the main entry point and control loop for one visitor's journey.
//! It owns the session's state machines, reacts to visitor events, and runs
//! every delayed step (consultation opening, analysis dwell, whispers,
//! auto-advance) from a single timer slot so nothing outlives the session.

use crate::{
    error::AppError,
    session::{
        cues,
        protocol::{JourneyUpdate, VisitorEvent},
        state::{AppState, SessionState, TimerKind},
    },
};
use healing_journey_core::{
    domain::{IntakeStage, JourneyPhase, UserRecord},
    intake::{suggest, IntakeError},
    pager::{ManualAction, ResultsPager},
    results::ResultsBook,
};
use std::sync::Arc;
use tokio::{sync::mpsc, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Whether the control loop keeps running after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Runs a journey until the visitor leaves, the event stream closes, or
/// `shutdown` is cancelled. Returns the visitor's record as it stood at the end.
///
/// Teardown always runs: the pending timer is dropped, in-flight cues are
/// cancelled and the ambient soundscape is stopped.
pub async fn run_session(
    app_state: Arc<AppState>,
    mut events: mpsc::Receiver<VisitorEvent>,
    updates: mpsc::Sender<JourneyUpdate>,
    shutdown: CancellationToken,
) -> Result<UserRecord, AppError> {
    let mut session = SessionState::new(app_state.config.language);
    info!(
        journey_id = %session.journey.id(),
        language = %session.language,
        "Journey session started."
    );
    let greeting = JourneyUpdate::SessionStarted {
        language: session.language,
        strings: session.locale(&app_state).strings.clone(),
    };
    if send(&updates, greeting).await.is_err() {
        info!("Visitor stopped listening before the session started.");
        teardown(&app_state, &mut session).await;
        return Ok(session.journey.record().clone());
    }

    let outcome = loop {
        let deadline = session.deadline();
        let step = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested.");
                Ok(Flow::Stop)
            }
            event = events.recv() => match event {
                Some(event) => handle_event(event, &app_state, &mut session, &updates).await,
                None => {
                    info!("Visitor event stream closed.");
                    Ok(Flow::Stop)
                }
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                match session.timer.take() {
                    Some(timer) => handle_timer(timer.kind, &app_state, &mut session, &updates).await,
                    None => Ok(Flow::Continue),
                }
            }
        };

        match step {
            Ok(Flow::Continue) => {}
            Ok(Flow::Stop) => break Ok(()),
            Err(AppError::Disconnected) => {
                info!("Visitor stopped listening for updates.");
                break Ok(());
            }
            Err(e) => {
                error!("Journey session failed: {}", e);
                break Err(e);
            }
        }
    };

    teardown(&app_state, &mut session).await;
    outcome.map(|()| session.journey.record().clone())
}

async fn teardown(app_state: &AppState, session: &mut SessionState) {
    session.timer = None;
    session.cue_token.cancel();
    if let Err(e) = app_state.ambient.stop().await {
        warn!("Failed to stop ambient audio: {}", e);
    }
    let lasted = chrono::Utc::now() - session.journey.started_at();
    info!(
        journey_id = %session.journey.id(),
        phase = %session.journey.phase(),
        seconds = lasted.num_seconds(),
        "Journey session closed."
    );
}

async fn send(updates: &mpsc::Sender<JourneyUpdate>, update: JourneyUpdate) -> Result<(), AppError> {
    updates
        .send(update)
        .await
        .map_err(|_| AppError::Disconnected)
}

//=========================================================================================
// Visitor Events
//=========================================================================================

async fn handle_event(
    event: VisitorEvent,
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<Flow, AppError> {
    debug!(event = ?event, "Visitor event received.");
    match event {
        VisitorEvent::StartConsultation => {
            if session.journey.phase() != JourneyPhase::Intake || session.consultation_requested {
                debug!("Consultation already requested; ignoring.");
                return Ok(Flow::Continue);
            }
            session.consultation_requested = true;
            session.arm(
                TimerKind::OpenConsultation,
                app_state.config.timings.consultation_open,
            );
        }
        VisitorEvent::InputChanged { text } => {
            if !accepts_intake_input(session) {
                return Ok(Flow::Continue);
            }
            let suggestion = suggest(&text, &session.locale(app_state).quick_picks);
            let text = suggestion.as_ref().map(|s| s.text().to_string());
            session.suggestion = suggestion;
            send(updates, JourneyUpdate::Suggestion { text }).await?;
        }
        VisitorEvent::SubmitCondition { text } => {
            if !accepts_intake_input(session) {
                return Ok(Flow::Continue);
            }
            let accepted = session
                .intake
                .submit_text(&text, session.language)
                .map(|result| result.key);
            return begin_analysis(accepted, app_state, session, updates).await;
        }
        VisitorEvent::AcceptSuggestion => {
            if !accepts_intake_input(session) {
                return Ok(Flow::Continue);
            }
            let Some(suggestion) = session.suggestion.clone() else {
                debug!("No suggestion on offer; ignoring.");
                return Ok(Flow::Continue);
            };
            let accepted = session
                .intake
                .submit_text(&suggestion.submission_text(), session.language)
                .map(|result| result.key);
            return begin_analysis(accepted, app_state, session, updates).await;
        }
        VisitorEvent::SelectQuickPick { index } => {
            if !accepts_intake_input(session) {
                return Ok(Flow::Continue);
            }
            let picks = &session.locale(app_state).quick_picks;
            let accepted = session
                .intake
                .select_quick_pick(picks, index, session.language)
                .map(|result| result.key);
            return begin_analysis(accepted, app_state, session, updates).await;
        }
        VisitorEvent::SubmitForm { form } => match session.intake.submit_form(form) {
            Ok(update) => {
                session
                    .journey
                    .complete_intake(update)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                send(
                    updates,
                    JourneyUpdate::PhaseChanged {
                        phase: JourneyPhase::Transition,
                    },
                )
                .await?;
                session.arm(TimerKind::Whisper(0), app_state.config.timings.whisper_lead);
            }
            Err(IntakeError::MissingFields(missing)) => {
                info!(missing = ?missing, "Reservation form rejected.");
                let missing = missing.into_iter().map(String::from).collect();
                send(updates, JourneyUpdate::FormRejected { missing }).await?;
            }
            Err(e) => debug!("Form submission ignored: {}", e),
        },
        VisitorEvent::NextPage => navigate(ManualAction::Next, app_state, session, updates).await?,
        VisitorEvent::PrevPage => navigate(ManualAction::Prev, app_state, session, updates).await?,
        VisitorEvent::GotoPage { index } => {
            navigate(ManualAction::Goto(index), app_state, session, updates).await?
        }
        VisitorEvent::Key { key } => {
            navigate(ManualAction::Key(key), app_state, session, updates).await?
        }
        VisitorEvent::PauseAutoAdvance => {
            if let Some(pager) = session.pager.as_mut() {
                pager.pause();
                session.disarm(TimerKind::AutoAdvance);
                debug!("Auto-advance held.");
            }
        }
        VisitorEvent::ResumeAutoAdvance => {
            if let Some(pager) = session.pager.as_mut() {
                pager.resume();
                rearm_auto_advance(app_state, session);
            }
        }
        VisitorEvent::ToggleLanguage => toggle_language(app_state, session, updates).await?,
        VisitorEvent::ToggleAmbient => {
            let ambient = &app_state.ambient;
            let result = if ambient.is_playing() {
                ambient.stop().await
            } else {
                ambient.start().await
            };
            if let Err(e) = result {
                warn!("Ambient toggle failed: {}", e);
            }
            send(
                updates,
                JourneyUpdate::AmbientChanged {
                    playing: ambient.is_playing(),
                },
            )
            .await?;
        }
        VisitorEvent::Leave => {
            info!("Visitor left the journey.");
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

/// Condition input is only taken once the consultation panel is open.
fn accepts_intake_input(session: &SessionState) -> bool {
    if !session.consultation_open {
        debug!("Consultation is not open yet; ignoring intake input.");
    }
    session.consultation_open
}

async fn begin_analysis<T: std::fmt::Debug>(
    accepted: Result<T, IntakeError>,
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<Flow, AppError> {
    match accepted {
        Ok(key) => {
            debug!(key = ?key, "Analyzing condition.");
            session.suggestion = None;
            session.arm(
                TimerKind::FinishAnalysis,
                app_state.config.timings.analyzing_dwell,
            );
            let condition = session.intake.condition().unwrap_or_default().to_string();
            send(updates, JourneyUpdate::Analyzing { condition }).await?;
        }
        Err(e) => debug!("Condition refused: {}", e),
    }
    Ok(Flow::Continue)
}

async fn navigate(
    action: ManualAction,
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<(), AppError> {
    let Some(pager) = session.pager.as_mut() else {
        debug!("No results to navigate yet; ignoring.");
        return Ok(());
    };
    let turn = pager.interact(action);
    session.disarm(TimerKind::AutoAdvance);
    if turn.is_some() {
        on_page_turn(false, app_state, session, updates).await?;
    }
    Ok(())
}

async fn toggle_language(
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<(), AppError> {
    session.language = session.language.toggle();
    info!(language = %session.language, "Language changed.");
    send(
        updates,
        JourneyUpdate::LanguageChanged {
            language: session.language,
            strings: session.locale(app_state).strings.clone(),
        },
    )
    .await?;

    // Quick-picks are re-sent only while they are on screen.
    let bundle = session.locale(app_state);
    if session.consultation_open && session.intake.stage() == IntakeStage::Input {
        session.suggestion = None;
        send(
            updates,
            JourneyUpdate::ConsultationOpened {
                quick_picks: bundle.quick_picks.clone(),
            },
        )
        .await?;
    }
    if session.book.is_some() {
        session.book = Some(ResultsBook::render(session.journey.record(), bundle));
        show_current_page(false, session, updates).await?;
    }
    Ok(())
}

//=========================================================================================
// Timers
//=========================================================================================

async fn handle_timer(
    kind: TimerKind,
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<Flow, AppError> {
    debug!(timer = ?kind, "Timer fired.");
    let timings = &app_state.config.timings;
    match kind {
        TimerKind::OpenConsultation => {
            session.consultation_open = true;
            info!("Consultation opened.");
            send(
                updates,
                JourneyUpdate::ConsultationOpened {
                    quick_picks: session.locale(app_state).quick_picks.clone(),
                },
            )
            .await?;
        }
        TimerKind::FinishAnalysis => match session.intake.finish_analysis() {
            Ok(()) => {
                let condition = session.intake.condition().unwrap_or_default().to_string();
                send(updates, JourneyUpdate::FormRequested { condition }).await?;
            }
            Err(e) => warn!("Analysis timer fired out of stage: {}", e),
        },
        TimerKind::Whisper(index) => {
            let strings = &session.locale(app_state).strings;
            let count = strings.whispers.len();
            if let Some(text) = strings.whispers.get(index) {
                let name = &session.journey.record().name;
                let dedication = (!name.is_empty()).then(|| strings.dedication(name));
                send(
                    updates,
                    JourneyUpdate::Whisper {
                        index,
                        text: text.clone(),
                        dedication,
                    },
                )
                .await?;
            }

            if index + 1 < count {
                session.arm(TimerKind::Whisper(index + 1), timings.whisper_interval);
            } else {
                let total = timings.transition_total(count as u32);
                let elapsed = timings.whisper_offset(index as u32);
                session.arm(TimerKind::FinishTransition, total.saturating_sub(elapsed));
            }
        }
        TimerKind::FinishTransition => open_results(app_state, session, updates).await?,
        TimerKind::AutoAdvance => {
            let Some(pager) = session.pager.as_mut() else {
                return Ok(Flow::Continue);
            };
            if pager.auto_advance().is_some() {
                let reached_end = pager.is_last_page();
                on_page_turn(true, app_state, session, updates).await?;
                if reached_end {
                    info!("Auto-advance reached the last page.");
                    send(updates, JourneyUpdate::AutoAdvanceStopped).await?;
                }
            }
        }
    }
    Ok(Flow::Continue)
}

async fn open_results(
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<(), AppError> {
    let bundle = session.locale(app_state);
    let record = session
        .journey
        .complete_transition()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let category = record
        .classification
        .as_ref()
        .map(|result| result.key)
        .unwrap_or_default();

    let book = ResultsBook::render(record, bundle);
    let pager = ResultsPager::new(bundle.steps.len());
    info!(category = %category, pages = pager.total_pages(), "Results ready.");

    send(
        updates,
        JourneyUpdate::PhaseChanged {
            phase: JourneyPhase::Results,
        },
    )
    .await?;
    send(
        updates,
        JourneyUpdate::ResultsReady {
            total_pages: pager.total_pages(),
            category,
        },
    )
    .await?;

    session.book = Some(book);
    session.pager = Some(pager);
    show_current_page(false, session, updates).await?;

    if app_state.config.ambient_audio {
        if let Err(e) = app_state.ambient.start().await {
            warn!("Ambient audio unavailable: {}", e);
        }
        send(
            updates,
            JourneyUpdate::AmbientChanged {
                playing: app_state.ambient.is_playing(),
            },
        )
        .await?;
    }

    rearm_auto_advance(app_state, session);
    Ok(())
}

//=========================================================================================
// Page Display
//=========================================================================================

/// Fires the cues for a page that just changed, shows it and decides whether
/// auto-advance runs again.
async fn on_page_turn(
    auto: bool,
    app_state: &Arc<AppState>,
    session: &mut SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<(), AppError> {
    cues::play_page_turn(
        app_state.ambient.clone(),
        &app_state.config.timings,
        session.cue_token.clone(),
    );
    show_current_page(auto, session, updates).await?;
    rearm_auto_advance(app_state, session);
    Ok(())
}

async fn show_current_page(
    auto: bool,
    session: &SessionState,
    updates: &mpsc::Sender<JourneyUpdate>,
) -> Result<(), AppError> {
    let (Some(pager), Some(book)) = (&session.pager, &session.book) else {
        return Ok(());
    };
    let index = pager.current_index();
    let page = book
        .page(index)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("no page at index {}", index)))?;
    send(
        updates,
        JourneyUpdate::PageShown {
            index,
            direction: pager.direction(),
            page,
            auto,
        },
    )
    .await
}

fn rearm_auto_advance(app_state: &AppState, session: &mut SessionState) {
    let wanted = session
        .pager
        .as_ref()
        .is_some_and(ResultsPager::should_auto_advance);
    if wanted {
        session.arm(TimerKind::AutoAdvance, app_state.config.timings.auto_advance);
    } else {
        session.disarm(TimerKind::AutoAdvance);
    }
}
