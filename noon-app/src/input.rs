//! Console input surface and capture selection
//!
//! Maps stdin lines onto the engine's key events so the actor can be driven
//! from a terminal. One word per line: `up`, `down`, `left`, `right` are
//! short presses, `ok` is a long press, and `back` (or `quit`) stops the
//! application.

use std::path::PathBuf;
use std::time::SystemTime;

use noon_engine::{FileSelector, InputEvent, InputKey, TriggerCommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Parse one console line into an input event
pub fn parse_line(line: &str) -> Option<InputEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "up" => Some(InputEvent::short(InputKey::Up)),
        "down" => Some(InputEvent::short(InputKey::Down)),
        "left" => Some(InputEvent::short(InputKey::Left)),
        "right" => Some(InputEvent::short(InputKey::Right)),
        "ok" => Some(InputEvent::long(InputKey::Ok)),
        "back" | "quit" => Some(InputEvent::short(InputKey::Back)),
        _ => None,
    }
}

/// Forward stdin lines to the trigger actor until stdin or the actor closes
pub async fn run_input_task(cmd_tx: mpsc::Sender<TriggerCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(event) = parse_line(&line) else {
            debug!("unrecognized input: {:?}", line);
            continue;
        };
        if cmd_tx.send(TriggerCommand::Input(event)).await.is_err() {
            break;
        }
    }
}

/// Picks the most recently modified capture in a directory
///
/// Stands in for an interactive file browser: a long OK press selects
/// whatever `.sub` file was written last.
pub struct NewestCaptureSelector {
    dir: PathBuf,
}

impl NewestCaptureSelector {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FileSelector for NewestCaptureSelector {
    fn pick(&mut self) -> Option<PathBuf> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot list {}: {}", self.dir.display(), e);
                return None;
            }
        };

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "sub") {
                continue;
            }
            let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
                continue;
            };
            if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
                newest = Some((modified, path));
            }
        }
        newest.map(|(_, path)| path)
    }
}
