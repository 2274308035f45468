//! Asynchronous transmit session
//!
//! Drives a resolved encoder against the radio stack until the hardware
//! reports completion, then stops and sleeps the radio. The poll runs as an
//! async task so the caller's event loop keeps turning; a drop guard returns
//! the stack to sleep on every exit path, including task cancellation.

use std::time::Duration;

use noon_capture::{Storage, TransmissionDescriptor};
use tracing::{debug, info};

use crate::error::TxError;
use crate::protocol;
use crate::stack::RadioStack;

/// Completion poll cadence
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of a completed transmit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSummary {
    /// Frequency actually used, after channel snapping by the stack
    pub tuned_hz: u32,
}

/// Returns the stack to a released idle state when the session ends
struct IdleGuard<'a> {
    radio: &'a mut dyn RadioStack,
    transmitting: bool,
}

impl Drop for IdleGuard<'_> {
    fn drop(&mut self) {
        if self.transmitting {
            self.radio.stop_async_tx();
        }
        self.radio.sleep();
    }
}

/// Transmit one descriptor through the radio stack
///
/// The encoder is built before the radio is touched, so resolution failures
/// leave the hardware untouched. Once the radio has been configured, stop
/// and sleep run no matter how the session ends.
pub async fn transmit(
    radio: &mut dyn RadioStack,
    descriptor: &TransmissionDescriptor,
    storage: &dyn Storage,
) -> Result<TxSummary, TxError> {
    let frames = protocol::resolve(descriptor, storage)?;

    radio.reset();
    radio.load_preset(&descriptor.preset);
    let tuned_hz = radio.set_frequency(descriptor.frequency_hz);
    if tuned_hz != descriptor.frequency_hz {
        debug!(
            "requested {} Hz, stack tuned {} Hz",
            descriptor.frequency_hz, tuned_hz
        );
    }

    let mut guard = IdleGuard {
        radio,
        transmitting: false,
    };
    guard.radio.start_async_tx(frames)?;
    guard.transmitting = true;
    info!("transmission started on {} Hz", tuned_hz);

    while !guard.radio.is_async_tx_complete() {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    info!("transmission complete");

    Ok(TxSummary { tuned_hz })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::FrameSource;
    use noon_capture::Preset;
    use std::io::{self, Read};
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct NoStorage;

    impl Storage for NoStorage {
        fn open(&self, _path: &Path) -> io::Result<Box<dyn Read + Send>> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no files"))
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Reset,
        LoadPreset,
        SetFrequency(u32),
        StartTx,
        StopTx,
        Sleep,
    }

    struct TestRadio {
        calls: Mutex<Vec<Call>>,
        frames: Option<Box<dyn FrameSource>>,
        polls_until_done: u32,
        fail_start: bool,
        snap_to: u32,
    }

    impl TestRadio {
        fn new(polls_until_done: u32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                frames: None,
                polls_until_done,
                fail_start: false,
                snap_to: 0,
            }
        }

        fn calls(&self) -> Vec<Call> {
            std::mem::take(&mut self.calls.lock().unwrap())
        }

        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl RadioStack for TestRadio {
        fn reset(&mut self) {
            self.push(Call::Reset);
        }

        fn load_preset(&mut self, _preset: &Preset) {
            self.push(Call::LoadPreset);
        }

        fn set_frequency(&mut self, hz: u32) -> u32 {
            self.push(Call::SetFrequency(hz));
            if self.snap_to != 0 {
                self.snap_to
            } else {
                hz
            }
        }

        fn start_async_tx(&mut self, frames: Box<dyn FrameSource>) -> Result<(), TxError> {
            if self.fail_start {
                return Err(TxError::StartFailed("test".to_string()));
            }
            self.push(Call::StartTx);
            self.frames = Some(frames);
            Ok(())
        }

        fn is_async_tx_complete(&mut self) -> bool {
            if self.polls_until_done == 0 {
                true
            } else {
                self.polls_until_done -= 1;
                false
            }
        }

        fn stop_async_tx(&mut self) {
            self.push(Call::StopTx);
            self.frames = None;
        }

        fn sleep(&mut self) {
            self.push(Call::Sleep);
        }
    }

    fn princeton_descriptor() -> TransmissionDescriptor {
        TransmissionDescriptor {
            frequency_hz: 433_920_000,
            preset: Preset::Ook650,
            protocol: "Princeton".to_string(),
            payload: "Key: 00 00 00 00 00 95 D5 D4\nBit: 24\nTE: 400\n".to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_runs_to_completion() {
        let mut radio = TestRadio::new(2);

        let summary = transmit(&mut radio, &princeton_descriptor(), &NoStorage)
            .await
            .unwrap();

        assert_eq!(summary.tuned_hz, 433_920_000);
        assert_eq!(
            radio.calls(),
            vec![
                Call::Reset,
                Call::LoadPreset,
                Call::SetFrequency(433_920_000),
                Call::StartTx,
                Call::StopTx,
                Call::Sleep,
            ]
        );
        assert!(radio.frames.is_none(), "frame source released");
    }

    #[tokio::test]
    async fn test_adjusted_frequency_is_authoritative() {
        let mut radio = TestRadio::new(0);
        radio.snap_to = 433_919_500;

        let summary = transmit(&mut radio, &princeton_descriptor(), &NoStorage)
            .await
            .unwrap();

        assert_eq!(summary.tuned_hz, 433_919_500);
    }

    #[tokio::test]
    async fn test_unknown_protocol_leaves_radio_untouched() {
        let mut radio = TestRadio::new(0);
        let mut descriptor = princeton_descriptor();
        descriptor.protocol = "KeeLoq".to_string();

        let err = transmit(&mut radio, &descriptor, &NoStorage)
            .await
            .unwrap_err();

        assert_eq!(err, TxError::UnknownProtocol("KeeLoq".to_string()));
        assert!(radio.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_failure_still_sleeps_radio() {
        let mut radio = TestRadio::new(0);
        radio.fail_start = true;

        let err = transmit(&mut radio, &princeton_descriptor(), &NoStorage)
            .await
            .unwrap_err();

        assert!(matches!(err, TxError::StartFailed(_)));
        let calls = radio.calls();
        assert_eq!(calls.last(), Some(&Call::Sleep));
        assert!(!calls.contains(&Call::StopTx), "nothing was started");
    }
}
