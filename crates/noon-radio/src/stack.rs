//! Radio stack service interface
//!
//! The low-level driver (frequency synthesis, async frame pump) lives with
//! the host; this trait is the seam the transmit session drives it through.
//! Exactly one owner may hold the stack at a time, and whoever takes it for
//! a session must return it asleep on every exit path.

use noon_capture::Preset;

use crate::error::TxError;

/// One carrier on/off pulse, duration in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDuration {
    /// Carrier on (true) or off (false)
    pub level: bool,
    /// Pulse length in microseconds
    pub duration_us: u32,
}

impl LevelDuration {
    /// Carrier-on pulse
    pub fn high(duration_us: u32) -> Self {
        Self {
            level: true,
            duration_us,
        }
    }

    /// Carrier-off pulse
    pub fn low(duration_us: u32) -> Self {
        Self {
            level: false,
            duration_us,
        }
    }
}

/// Pull-based supplier of transmittable frames, pumped by the radio stack
pub trait FrameSource: Send {
    /// Next frame, or None once the capture is exhausted
    fn next_frame(&mut self) -> Option<LevelDuration>;
}

/// Transmit primitives of the radio hardware
pub trait RadioStack: Send {
    /// Return the hardware to a known idle state
    fn reset(&mut self);

    /// Load a modulation preset
    fn load_preset(&mut self, preset: &Preset);

    /// Tune the carrier; returns the adjusted frequency actually in use,
    /// snapped to a supported channel. The adjusted value is authoritative
    /// for the rest of the session.
    fn set_frequency(&mut self, hz: u32) -> u32;

    /// Begin asynchronous transmission pumped from `frames`
    fn start_async_tx(&mut self, frames: Box<dyn FrameSource>) -> Result<(), TxError>;

    /// Whether the in-flight transmission has finished
    fn is_async_tx_complete(&mut self) -> bool;

    /// Stop the in-flight transmission and release the frame source
    fn stop_async_tx(&mut self);

    /// Put the hardware to sleep
    fn sleep(&mut self);
}
