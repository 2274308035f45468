//! High Noon Console Application
//!
//! Arms a capture-file replay to fire when the clock reaches a configured
//! time-of-day. The trigger actor runs against the simulated radio stack;
//! a hardware driver implementing `RadioStack` slots in without touching
//! the engine.

mod input;
mod settings;

use std::sync::Arc;

use noon_capture::FsStorage;
use noon_engine::{
    run_trigger_actor, SystemClock, TriggerCommand, TriggerEvent, TriggerServices,
};
use noon_radio::RegionPolicy;
use noon_sim::SimRadio;
use settings::Settings;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Include all our crates in the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "highnoon=info,noon_engine=info,noon_radio=info,noon_capture=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting High Noon");

    let settings = Settings::load_or_init();
    info!(
        "capture dir {}, tick every {} ms",
        settings.capture_dir.display(),
        settings.tick_interval_ms
    );

    let storage = Arc::new(FsStorage);
    if let Err(e) = noon_capture::Storage::create_dir_all(storage.as_ref(), &settings.work_dir) {
        warn!(
            "could not create work dir {}: {}",
            settings.work_dir.display(),
            e
        );
    }

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (event_tx, mut event_rx) = mpsc::channel(64);

    let services = TriggerServices {
        clock: Arc::new(SystemClock),
        storage,
        policy: Arc::new(RegionPolicy),
        selector: Box::new(input::NewestCaptureSelector::new(settings.capture_dir)),
        radio: Box::new(SimRadio::new()),
    };
    let actor = tokio::spawn(run_trigger_actor(
        services,
        cmd_rx,
        cmd_tx.clone(),
        event_tx,
    ));

    // Periodic trigger check
    let tick_tx = cmd_tx.clone();
    let tick_interval = Duration::from_millis(settings.tick_interval_ms.max(50));
    tokio::spawn(async move {
        let mut ticker = interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tick_tx.send(TriggerCommand::Tick).await.is_err() {
                break;
            }
        }
    });

    tokio::spawn(input::run_input_task(cmd_tx));

    // Render surface: log status lines, skipping unchanged ticks
    let mut last_status = None;
    while let Some(event) = event_rx.recv().await {
        match event {
            TriggerEvent::StatusChanged(status) => {
                let line = status.to_string();
                if last_status.as_ref() != Some(&line) {
                    info!("{}", line);
                    last_status = Some(line);
                }
            }
            TriggerEvent::FileSelected(path) => {
                info!("selected {}", path.display());
            }
            TriggerEvent::FireStarted => {
                info!("firing");
            }
            TriggerEvent::FireCompleted { tuned_hz } => {
                info!("transmission complete on {} Hz", tuned_hz);
            }
            TriggerEvent::FireFailed { message } => {
                warn!("fire failed: {}", message);
            }
            TriggerEvent::ShuttingDown => {
                break;
            }
        }
    }

    if let Err(e) = actor.await {
        warn!("trigger actor task failed: {}", e);
    }
    info!("High Noon stopped");
}
