//! Time-Triggered Transmission Engine
//!
//! Arms a single radio transmission to fire once the clock reaches a
//! user-configured time-of-day:
//!
//! - [`TriggerTime`] and its comparator against the wall clock
//! - [`EditCursor`] and the bounded field editor
//! - [`Scheduler`]: the Idle/Armed/Firing lifecycle, disarmed by every fire
//!   attempt and re-armed only by an accepted edit
//! - [`run_trigger_actor`]: the async actor that owns the scheduler and the
//!   radio stack, fed by one ordered command channel
//!
//! Capture loading lives in `noon-capture` and the transmit session in
//! `noon-radio`; this crate ties them to the clock.

pub mod actor;
pub mod clock;
pub mod editor;
pub mod engine;
pub mod error;
pub mod events;
pub mod time;

pub use actor::{run_trigger_actor, FileSelector, TriggerServices};
pub use clock::{Clock, ManualClock, SystemClock};
pub use editor::EditCursor;
pub use engine::{Scheduler, StatusSnapshot, TriggerState};
pub use error::TriggerError;
pub use events::{InputEvent, InputKey, InputPress, TriggerCommand, TriggerEvent};
pub use time::{TriggerTime, WallTime};
