//! Simulated radio stack
//!
//! Records every call made against it and models the pieces of hardware
//! behavior the transmit session depends on: channel snapping on tune,
//! completion after a configurable number of polls, and retention of the
//! frame source until the transmission is stopped.

use noon_capture::Preset;
use noon_radio::{FrameSource, LevelDuration, RadioStack, TxError};
use tracing::debug;

/// Hardware state the simulator is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimState {
    /// Powered but unconfigured
    #[default]
    Idle,
    /// Tuned and ready to transmit
    Tuned,
    /// Async transmission in flight
    Transmitting,
    /// Asleep
    Sleeping,
}

/// One recorded stack call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCall {
    Reset,
    LoadPreset(String),
    SetFrequency(u32),
    StartTx,
    StopTx,
    Sleep,
}

/// A simulated radio stack
pub struct SimRadio {
    state: SimState,
    calls: Vec<SimCall>,
    channel_step: u32,
    polls_until_done: u32,
    polls_remaining: u32,
    fail_start: bool,
    frames: Option<Box<dyn FrameSource>>,
    transmitted: Vec<LevelDuration>,
    tuned_hz: Option<u32>,
}

impl Default for SimRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRadio {
    /// Simulator that completes on the second poll, snapping to 500 Hz steps
    pub fn new() -> Self {
        Self {
            state: SimState::Idle,
            calls: Vec::new(),
            channel_step: 500,
            polls_until_done: 1,
            polls_remaining: 0,
            fail_start: false,
            frames: None,
            transmitted: Vec::new(),
            tuned_hz: None,
        }
    }

    /// Set the channel grid frequencies are snapped to
    pub fn with_channel_step(mut self, step: u32) -> Self {
        self.channel_step = step.max(1);
        self
    }

    /// Set how many completion polls return false before done
    pub fn with_polls_until_done(mut self, polls: u32) -> Self {
        self.polls_until_done = polls;
        self
    }

    /// Make `start_async_tx` fail
    pub fn with_failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Current hardware state
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Every call made against the stack, in order
    pub fn calls(&self) -> &[SimCall] {
        &self.calls
    }

    /// Whether the stack still owns a frame source
    pub fn holds_frame_source(&self) -> bool {
        self.frames.is_some()
    }

    /// Whether the stack was left asleep
    pub fn is_asleep(&self) -> bool {
        self.state == SimState::Sleeping
    }

    /// Frames pumped out of the source during transmission
    pub fn transmitted(&self) -> &[LevelDuration] {
        &self.transmitted
    }

    /// Frequency the stack is tuned to, post snapping
    pub fn tuned_hz(&self) -> Option<u32> {
        self.tuned_hz
    }
}

impl RadioStack for SimRadio {
    fn reset(&mut self) {
        self.calls.push(SimCall::Reset);
        self.state = SimState::Idle;
        self.tuned_hz = None;
    }

    fn load_preset(&mut self, preset: &Preset) {
        self.calls.push(SimCall::LoadPreset(preset.name().to_string()));
    }

    fn set_frequency(&mut self, hz: u32) -> u32 {
        let snapped = hz - hz % self.channel_step;
        self.calls.push(SimCall::SetFrequency(hz));
        self.tuned_hz = Some(snapped);
        self.state = SimState::Tuned;
        snapped
    }

    fn start_async_tx(&mut self, mut frames: Box<dyn FrameSource>) -> Result<(), TxError> {
        if self.fail_start {
            return Err(TxError::StartFailed("simulated start failure".to_string()));
        }
        self.calls.push(SimCall::StartTx);
        // The pump drains the source immediately; the box is retained until
        // stop, like hardware holding the yield callback.
        while let Some(frame) = frames.next_frame() {
            self.transmitted.push(frame);
        }
        debug!("sim transmitted {} frames", self.transmitted.len());
        self.frames = Some(frames);
        self.polls_remaining = self.polls_until_done;
        self.state = SimState::Transmitting;
        Ok(())
    }

    fn is_async_tx_complete(&mut self) -> bool {
        if self.state != SimState::Transmitting {
            return true;
        }
        if self.polls_remaining == 0 {
            true
        } else {
            self.polls_remaining -= 1;
            false
        }
    }

    fn stop_async_tx(&mut self) {
        self.calls.push(SimCall::StopTx);
        self.frames = None;
        self.state = SimState::Tuned;
    }

    fn sleep(&mut self) {
        self.calls.push(SimCall::Sleep);
        self.state = SimState::Sleeping;
    }
}
