//! Error types for transmission

use thiserror::Error;

/// Errors that can abort a transmit session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    /// Protocol name not resolvable to an encoder
    #[error("no encoder for protocol: {0}")]
    UnknownProtocol(String),

    /// Payload records could not be decoded into frames
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The radio stack refused to start the transmission
    #[error("transmission failed to start: {0}")]
    StartFailed(String),
}
