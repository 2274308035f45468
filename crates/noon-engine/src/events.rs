//! Commands into and events out of the trigger actor
//!
//! Input callbacks, the tick timer, and the transmit task all feed the same
//! command channel, so every mutation of the scheduler arrives in one
//! ordered stream with a single owner.

use std::fmt;
use std::path::PathBuf;

use noon_radio::{RadioStack, TxError, TxSummary};

use crate::engine::StatusSnapshot;

/// A key on the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Back,
}

/// How the key was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPress {
    Short,
    Long,
}

/// One input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: InputKey,
    pub press: InputPress,
}

impl InputEvent {
    pub fn short(key: InputKey) -> Self {
        Self {
            key,
            press: InputPress::Short,
        }
    }

    pub fn long(key: InputKey) -> Self {
        Self {
            key,
            press: InputPress::Long,
        }
    }
}

/// Commands sent to the trigger actor
pub enum TriggerCommand {
    /// Periodic clock tick; evaluates the comparator
    Tick,

    /// An input event from the host
    Input(InputEvent),

    /// A spawned transmit task finished and is handing the radio back
    TxFinished {
        /// The radio stack, returned asleep
        radio: Box<dyn RadioStack>,
        /// How the transmission ended
        result: Result<TxSummary, TxError>,
    },

    /// A spawned transmit task panicked; the radio box was lost with it
    TxCrashed {
        /// Diagnostic from the join error
        message: String,
    },

    /// Shut the actor down
    Shutdown,
}

impl fmt::Debug for TriggerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerCommand::Tick => write!(f, "Tick"),
            TriggerCommand::Input(event) => f.debug_tuple("Input").field(event).finish(),
            TriggerCommand::TxFinished { result, .. } => f
                .debug_struct("TxFinished")
                .field("result", result)
                .finish_non_exhaustive(),
            TriggerCommand::TxCrashed { message } => f
                .debug_struct("TxCrashed")
                .field("message", message)
                .finish(),
            TriggerCommand::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Events emitted by the trigger actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The display-facing state changed
    StatusChanged(StatusSnapshot),

    /// A capture file was selected
    FileSelected(PathBuf),

    /// A fire began; the transmit pipeline is running
    FireStarted,

    /// The transmission completed over the air
    FireCompleted {
        /// Frequency actually used
        tuned_hz: u32,
    },

    /// The fire attempt failed; the trigger stays disarmed
    FireFailed {
        /// Log-level diagnostic
        message: String,
    },

    /// The actor is stopping
    ShuttingDown,
}
