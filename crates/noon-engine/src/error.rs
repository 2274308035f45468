//! Error types for the trigger engine

use thiserror::Error;

/// Errors from one trigger cycle
///
/// All variants are handled within the cycle and surfaced as log
/// diagnostics; none of them stop the event loop.
#[derive(Error, Debug)]
pub enum TriggerError {
    /// No capture file has been selected
    #[error("no capture file selected")]
    NoFileSelected,

    /// The radio stack was lost with an earlier crashed transmit task
    #[error("radio stack unavailable")]
    RadioUnavailable,

    /// The capture file could not be loaded into a descriptor
    #[error("load failed: {0}")]
    Load(#[from] noon_capture::LoadError),

    /// The transmission itself failed
    #[error("transmit failed: {0}")]
    Transmit(#[from] noon_radio::TxError),
}
