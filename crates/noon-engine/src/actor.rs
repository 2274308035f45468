//! Trigger Actor
//!
//! The single owner of the scheduler. Clock ticks, input events, and
//! transmit completions all arrive through one command channel and are
//! processed strictly in order, so no two activities ever interleave their
//! mutations. Observers receive every state change through the event
//! channel.
//!
//! The radio stack is held as an owned box. When a fire begins, the box
//! moves into a spawned transmit task and comes back in the completion
//! command; while it is out, no second fire can start.
//!
//! # Example
//!
//! ```rust,ignore
//! use noon_engine::actor::{run_trigger_actor, TriggerServices};
//! use noon_engine::TriggerCommand;
//! use tokio::sync::mpsc;
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(64);
//! let (event_tx, mut event_rx) = mpsc::channel(64);
//!
//! tokio::spawn(run_trigger_actor(services, cmd_rx, cmd_tx.clone(), event_tx));
//!
//! // Feed ticks and input, consume events
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use noon_capture::{DescriptorLoader, FrequencyPolicy, Storage};
use noon_radio::{transmit, RadioStack};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::engine::Scheduler;
use crate::error::TriggerError;
use crate::events::{InputEvent, InputKey, InputPress, TriggerCommand, TriggerEvent};

/// The external file-browser collaborator
pub trait FileSelector: Send {
    /// Ask the user for a capture file; `None` if nothing was chosen
    fn pick(&mut self) -> Option<PathBuf>;
}

/// Services the trigger actor runs against
pub struct TriggerServices {
    /// Wall-clock source
    pub clock: Arc<dyn Clock>,
    /// Capture-file storage
    pub storage: Arc<dyn Storage>,
    /// Transmit-legality predicate
    pub policy: Arc<dyn FrequencyPolicy>,
    /// File-selection collaborator
    pub selector: Box<dyn FileSelector>,
    /// The radio stack, owned exclusively by the actor
    pub radio: Box<dyn RadioStack>,
}

/// Internal state for the trigger actor
struct TriggerActorState {
    scheduler: Scheduler,
    clock: Arc<dyn Clock>,
    loader: DescriptorLoader,
    storage: Arc<dyn Storage>,
    selector: Box<dyn FileSelector>,
    /// `None` while a transmit task holds the stack
    radio: Option<Box<dyn RadioStack>>,
}

/// Run the trigger actor
///
/// Processes commands until `Shutdown`, a `Back` press, or the command
/// channel closing. `cmd_tx` must be a sender for the same channel as
/// `cmd_rx`; spawned transmit tasks use it to hand the radio back.
pub async fn run_trigger_actor(
    services: TriggerServices,
    mut cmd_rx: mpsc::Receiver<TriggerCommand>,
    cmd_tx: mpsc::Sender<TriggerCommand>,
    event_tx: mpsc::Sender<TriggerEvent>,
) {
    let mut state = TriggerActorState {
        scheduler: Scheduler::new(services.clock.now()),
        clock: services.clock,
        loader: DescriptorLoader::new(Arc::clone(&services.storage), services.policy),
        storage: services.storage,
        selector: services.selector,
        radio: Some(services.radio),
    };
    info!(
        "trigger actor started, target {}",
        state.scheduler.trigger()
    );

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            TriggerCommand::Tick => {
                let now = state.clock.now();
                if state.scheduler.should_fire(now) {
                    fire(&mut state, &cmd_tx, &event_tx).await;
                }
                let _ = event_tx
                    .send(TriggerEvent::StatusChanged(state.scheduler.status(now)))
                    .await;
            }

            TriggerCommand::Input(event) => {
                if handle_input(&mut state, event, &event_tx).await {
                    let _ = event_tx.send(TriggerEvent::ShuttingDown).await;
                    break;
                }
            }

            TriggerCommand::TxFinished { radio, result } => {
                state.radio = Some(radio);
                state.scheduler.finish_fire();
                match result {
                    Ok(summary) => {
                        info!("transmission done on {} Hz", summary.tuned_hz);
                        let _ = event_tx
                            .send(TriggerEvent::FireCompleted {
                                tuned_hz: summary.tuned_hz,
                            })
                            .await;
                    }
                    Err(e) => {
                        report_failure(&event_tx, TriggerError::Transmit(e)).await;
                    }
                }
                let status = state.scheduler.status(state.clock.now());
                let _ = event_tx.send(TriggerEvent::StatusChanged(status)).await;
            }

            TriggerCommand::TxCrashed { message } => {
                // The radio box went down with the task; later fire attempts
                // report RadioUnavailable instead of stalling in Firing.
                state.scheduler.finish_fire();
                warn!("transmit task crashed: {}", message);
                let _ = event_tx.send(TriggerEvent::FireFailed { message }).await;
                let status = state.scheduler.status(state.clock.now());
                let _ = event_tx.send(TriggerEvent::StatusChanged(status)).await;
            }

            TriggerCommand::Shutdown => {
                let _ = event_tx.send(TriggerEvent::ShuttingDown).await;
                break;
            }
        }
    }

    info!("trigger actor stopped");
}

/// Apply one input event; returns whether the actor should stop
async fn handle_input(
    state: &mut TriggerActorState,
    event: InputEvent,
    event_tx: &mpsc::Sender<TriggerEvent>,
) -> bool {
    let mut changed = false;
    match (event.key, event.press) {
        (InputKey::Up, InputPress::Short) => {
            changed = state.scheduler.adjust(1);
        }
        (InputKey::Down, InputPress::Short) => {
            changed = state.scheduler.adjust(-1);
        }
        (InputKey::Left, InputPress::Short) => {
            state.scheduler.move_cursor(-1);
            changed = true;
        }
        (InputKey::Right, InputPress::Short) => {
            state.scheduler.move_cursor(1);
            changed = true;
        }
        (InputKey::Ok, InputPress::Long) => {
            if let Some(path) = state.selector.pick() {
                info!("capture selected: {}", path.display());
                state.scheduler.select_file(path.clone());
                let _ = event_tx.send(TriggerEvent::FileSelected(path)).await;
                changed = true;
            }
        }
        (InputKey::Back, _) => return true,
        (key, press) => {
            debug!("ignoring input {:?} ({:?})", key, press);
        }
    }

    if changed {
        let status = state.scheduler.status(state.clock.now());
        let _ = event_tx.send(TriggerEvent::StatusChanged(status)).await;
    }
    false
}

/// Start one fire cycle
///
/// Disarms immediately, so a failed attempt looks the same as a successful
/// one until the user re-arms with an edit. On a successful load the radio
/// box moves into a spawned task that runs the transmit session and sends
/// it back via `TxFinished`.
async fn fire(
    state: &mut TriggerActorState,
    cmd_tx: &mpsc::Sender<TriggerCommand>,
    event_tx: &mpsc::Sender<TriggerEvent>,
) {
    state.scheduler.begin_fire();

    let Some(path) = state.scheduler.selected_file().map(PathBuf::from) else {
        state.scheduler.finish_fire();
        report_failure(event_tx, TriggerError::NoFileSelected).await;
        return;
    };

    let descriptor = match state.loader.load(&path) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            state.scheduler.finish_fire();
            report_failure(event_tx, TriggerError::Load(e)).await;
            return;
        }
    };

    let Some(mut radio) = state.radio.take() else {
        state.scheduler.finish_fire();
        report_failure(event_tx, TriggerError::RadioUnavailable).await;
        return;
    };

    info!("firing: {}", path.display());
    let _ = event_tx.send(TriggerEvent::FireStarted).await;

    let storage = Arc::clone(&state.storage);
    let cmd_tx = cmd_tx.clone();
    let session = tokio::spawn(async move {
        let result = transmit(radio.as_mut(), &descriptor, storage.as_ref()).await;
        (radio, result)
    });
    // Watch the session through its join handle: a completion always comes
    // back to the actor, a panic included, so the scheduler cannot stay in
    // Firing forever.
    tokio::spawn(async move {
        let cmd = match session.await {
            Ok((radio, result)) => TriggerCommand::TxFinished { radio, result },
            Err(e) => TriggerCommand::TxCrashed {
                message: format!("transmit task failed: {}", e),
            },
        };
        if cmd_tx.send(cmd).await.is_err() {
            warn!("trigger actor gone before transmit completion");
        }
    });
}

async fn report_failure(event_tx: &mpsc::Sender<TriggerEvent>, error: TriggerError) {
    warn!("fire attempt failed: {}", error);
    let _ = event_tx
        .send(TriggerEvent::FireFailed {
            message: error.to_string(),
        })
        .await;
}
