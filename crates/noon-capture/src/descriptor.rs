//! Transmission descriptor and loader
//!
//! A descriptor is the validated in-memory form of one capture file, built
//! per trigger event and dropped as soon as the transmit session finishes.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::format::CaptureText;
use crate::preset::Preset;
use crate::raw;
use crate::storage::{self, Storage};

/// Carrier used when a capture omits its Frequency record
pub const DEFAULT_FREQUENCY_HZ: u32 = 433_920_000;

/// Transmit-legality predicate keyed by frequency
pub trait FrequencyPolicy: Send + Sync {
    /// Whether the hardware may transmit on `hz`
    fn is_tx_allowed(&self, hz: u32) -> bool;
}

/// Validated transmission parameters for one trigger event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionDescriptor {
    /// Carrier frequency in Hz (requested; the stack may snap it)
    pub frequency_hz: u32,
    /// Modulation preset
    pub preset: Preset,
    /// Protocol name as recorded in the capture
    pub protocol: String,
    /// Protocol-specific payload records
    pub payload: String,
}

/// Builds descriptors from capture files
pub struct DescriptorLoader {
    storage: Arc<dyn Storage>,
    policy: Arc<dyn FrequencyPolicy>,
}

impl DescriptorLoader {
    /// Create a loader over a storage service and a legality policy
    pub fn new(storage: Arc<dyn Storage>, policy: Arc<dyn FrequencyPolicy>) -> Self {
        Self { storage, policy }
    }

    /// Load and validate the capture file at `path`
    ///
    /// The file handle is scoped to the initial read, so it is released
    /// before any result is returned, including every error path.
    pub fn load(&self, path: &Path) -> Result<TransmissionDescriptor, LoadError> {
        let text = storage::read_to_string(self.storage.as_ref(), path).map_err(|e| {
            warn!("failed to open capture {}: {}", path.display(), e);
            LoadError::NotFound(path.display().to_string())
        })?;
        let capture = CaptureText::new(text);

        let frequency_hz = match capture.read_u32("Frequency") {
            Some(hz) => hz,
            None => {
                warn!(
                    "capture has no Frequency record, defaulting to {} Hz",
                    DEFAULT_FREQUENCY_HZ
                );
                DEFAULT_FREQUENCY_HZ
            }
        };

        // Legality is checked before any further parsing so an illegal
        // capture aborts without touching radio state.
        if !self.policy.is_tx_allowed(frequency_hz) {
            return Err(LoadError::Disallowed(frequency_hz));
        }

        let preset = capture
            .read_string("Preset")
            .map(Preset::from_name)
            .ok_or(LoadError::MissingPreset)?;

        let protocol = capture
            .read_string("Protocol")
            .ok_or(LoadError::MissingProtocol)?
            .to_string();

        let payload = if protocol == "RAW" {
            raw::regenerate_payload(path)
        } else {
            capture.into_text()
        };

        debug!(
            "loaded capture {}: {} Hz, preset {}, protocol {}",
            path.display(),
            frequency_hz,
            preset.name(),
            protocol
        );

        Ok(TransmissionDescriptor {
            frequency_hz,
            preset,
            protocol,
            payload,
        })
    }
}
