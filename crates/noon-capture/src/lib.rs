//! Capture File Library
//!
//! This crate reads the newline-delimited `Key: value` capture files produced
//! by an external recording tool and turns them into validated
//! [`TransmissionDescriptor`]s ready for replay:
//!
//! - **Format reader**: first-match key/value extraction over the raw stream
//! - **Preset table**: closed enumeration of modulation presets with a
//!   custom-passthrough variant for unrecognized names
//! - **Loader**: descriptor construction with frequency defaulting, a
//!   fail-fast transmit-legality check, and guaranteed file-handle release on
//!   every exit path
//! - **RAW regeneration**: canonical payload pointing back at the source file
//!   for timing-replay captures
//!
//! File access goes through the [`Storage`] service trait so hosts and tests
//! can substitute their own backends.

pub mod descriptor;
pub mod error;
pub mod format;
pub mod preset;
pub mod raw;
pub mod storage;

pub use descriptor::{
    DescriptorLoader, FrequencyPolicy, TransmissionDescriptor, DEFAULT_FREQUENCY_HZ,
};
pub use error::LoadError;
pub use format::CaptureText;
pub use preset::Preset;
pub use storage::{FsStorage, Storage};
