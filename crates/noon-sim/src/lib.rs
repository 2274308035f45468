//! Simulation layer for the trigger pipeline
//!
//! Provides in-memory stand-ins for the hardware services so the loader,
//! transmit session and trigger actor can be exercised end to end without a
//! radio or a filesystem:
//!
//! - [`SimRadio`]: a [`RadioStack`](noon_radio::RadioStack) that records
//!   every call, snaps frequencies to a channel grid, and exposes
//!   release/ownership inspectors
//! - [`MemStorage`] / [`TrackingStorage`]: capture
//!   [`Storage`](noon_capture::Storage) backends over in-memory files, the
//!   latter counting outstanding open handles for leak assertions

pub mod radio;
pub mod storage;

pub use radio::{SimRadio, SimState};
pub use storage::{MemStorage, TrackingStorage};
