//! Error types for capture file loading

use thiserror::Error;

/// Errors that can abort a descriptor load
///
/// All of these are fatal to the trigger cycle that requested the load;
/// none of them touch radio state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Capture file missing or unreadable
    #[error("capture file not found or unreadable: {0}")]
    NotFound(String),

    /// Mandatory Preset record absent
    #[error("capture file has no Preset record")]
    MissingPreset,

    /// Mandatory Protocol record absent
    #[error("capture file has no Protocol record")]
    MissingProtocol,

    /// Frequency failed the transmit-legality predicate
    #[error("transmission on {0} Hz is not allowed")]
    Disallowed(u32),
}
