//! Radio Transmission Library
//!
//! This crate owns everything between a validated
//! [`TransmissionDescriptor`](noon_capture::TransmissionDescriptor) and a
//! finished over-the-air replay:
//!
//! - **Stack interface**: the [`RadioStack`] trait the host's low-level
//!   driver implements, plus the [`FrameSource`] pump it pulls frames from
//! - **Legality policy**: the band table behind the loader's fail-fast
//!   frequency check
//! - **Protocol resolver**: closed [`ProtocolId`] lookup producing a frame
//!   encoder, with RAW timing replay and Princeton-style OOK built in
//! - **Transmit session**: async [`transmit`] driving the stack to
//!   completion on a 50 ms poll and always returning it asleep
//!
//! The stack is a process-wide exclusive resource: one session owns it at a
//! time and releases it idle on every exit path.

pub mod error;
pub mod policy;
pub mod protocol;
pub mod session;
pub mod stack;

pub use error::TxError;
pub use policy::{AllowAll, RegionPolicy};
pub use protocol::{resolve, ProtocolId, TimingTrack};
pub use session::{transmit, TxSummary, POLL_INTERVAL};
pub use stack::{FrameSource, LevelDuration, RadioStack};
