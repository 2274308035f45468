//! Scheduler state for the trigger lifecycle
//!
//! The scheduler is a plain value owned by the trigger actor; every mutation
//! goes through it, so there is no ambient application state. It tracks the
//! target time, the edit cursor, the armed flag, and whether a transmission
//! is in flight.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::editor::{self, EditCursor};
use crate::time::{TriggerTime, WallTime};

/// Where the trigger lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Not armed; the last cycle fired, or no edit has happened yet
    Idle,
    /// An edit re-armed the trigger and a fire is pending
    Armed,
    /// The transmit pipeline is running
    Firing,
}

/// The trigger scheduler
#[derive(Debug, Clone)]
pub struct Scheduler {
    trigger: TriggerTime,
    cursor: EditCursor,
    armed: bool,
    firing: bool,
    selected_file: Option<PathBuf>,
}

impl Scheduler {
    /// Scheduler targeting the given startup clock reading, unarmed
    pub fn new(now: WallTime) -> Self {
        Self {
            trigger: TriggerTime::from_wall(now),
            cursor: EditCursor::None,
            armed: false,
            firing: false,
            selected_file: None,
        }
    }

    pub fn state(&self) -> TriggerState {
        if self.firing {
            TriggerState::Firing
        } else if self.armed {
            TriggerState::Armed
        } else {
            TriggerState::Idle
        }
    }

    pub fn trigger(&self) -> TriggerTime {
        self.trigger
    }

    pub fn cursor(&self) -> EditCursor {
        self.cursor
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    /// Record the capture file chosen by the file browser
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
    }

    /// Move the edit cursor one step left or right
    pub fn move_cursor(&mut self, delta: i8) {
        self.cursor = self.cursor.moved(delta);
    }

    /// Adjust the field under the cursor
    ///
    /// Any accepted edit re-arms the trigger. Returns whether the edit took.
    pub fn adjust(&mut self, delta: i8) -> bool {
        let accepted = editor::adjust(&mut self.trigger, self.cursor, delta);
        if accepted {
            self.armed = true;
        }
        accepted
    }

    /// Whether this tick should start a fire
    ///
    /// Suppressed while a transmission is already in flight; only one runs
    /// at a time.
    pub fn should_fire(&self, now: WallTime) -> bool {
        self.armed && !self.firing && self.trigger.is_due(now)
    }

    /// Enter the firing state
    ///
    /// Disarms immediately: the attempt counts whether or not it succeeds,
    /// and only a fresh edit can arm the next one.
    pub fn begin_fire(&mut self) {
        self.armed = false;
        self.firing = true;
    }

    /// Leave the firing state
    pub fn finish_fire(&mut self) {
        self.firing = false;
    }

    /// Snapshot for the render surface
    pub fn status(&self, now: WallTime) -> StatusSnapshot {
        StatusSnapshot {
            now,
            target: self.trigger,
            cursor: self.cursor,
            state: self.state(),
            file_label: self
                .selected_file
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }
}

/// What the display shows: clock, target, cursor, armed indicator, file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub now: WallTime,
    pub target: TriggerTime,
    pub cursor: EditCursor,
    pub state: TriggerState,
    pub file_label: Option<String>,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indicator = match self.state {
            TriggerState::Idle => "done",
            TriggerState::Armed => "armed",
            TriggerState::Firing => "firing",
        };
        write!(
            f,
            "{} -> {} [{}] {}",
            self.now,
            self.target,
            indicator,
            self.file_label.as_deref().unwrap_or("(no file)")
        )
    }
}
