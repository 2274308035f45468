//! Protocol resolution and frame encoders
//!
//! Maps a descriptor's protocol name to an encoder that yields
//! [`LevelDuration`] frames for the radio stack to pump. The name set is a
//! closed enumeration with a static lookup table; unrecognized names resolve
//! to [`ProtocolId::Unsupported`] and are rejected explicitly rather than
//! falling through.

use noon_capture::{raw, storage, CaptureText, Storage, TransmissionDescriptor};
use tracing::debug;

use crate::error::TxError;
use crate::stack::{FrameSource, LevelDuration};

/// Closed set of replayable protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolId {
    /// Timing replay regenerated from the capture file
    Raw,
    /// Princeton-style fixed-key OOK
    Princeton,
    /// Name present in the capture but not replayable here
    Unsupported,
}

/// Recognized capture-file protocol names
const PROTOCOL_TABLE: &[(&str, ProtocolId)] = &[
    ("RAW", ProtocolId::Raw),
    ("Princeton", ProtocolId::Princeton),
];

impl ProtocolId {
    /// Map a capture-file protocol name to its variant
    pub fn from_name(name: &str) -> ProtocolId {
        PROTOCOL_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, id)| *id)
            .unwrap_or(ProtocolId::Unsupported)
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ProtocolId::Raw => "RAW",
            ProtocolId::Princeton => "Princeton",
            ProtocolId::Unsupported => "(unsupported)",
        }
    }
}

/// Build a frame source for the descriptor's protocol and payload
///
/// Resolution happens before any radio state change; an error here leaves
/// the hardware untouched.
pub fn resolve(
    descriptor: &TransmissionDescriptor,
    storage: &dyn Storage,
) -> Result<Box<dyn FrameSource>, TxError> {
    match ProtocolId::from_name(&descriptor.protocol) {
        ProtocolId::Raw => Ok(Box::new(TimingTrack::from_raw_payload(
            &descriptor.payload,
            storage,
        )?)),
        ProtocolId::Princeton => Ok(Box::new(TimingTrack::from_princeton_payload(
            &descriptor.payload,
        )?)),
        ProtocolId::Unsupported => Err(TxError::UnknownProtocol(descriptor.protocol.clone())),
    }
}

/// A fully decoded sequence of frames
#[derive(Debug)]
pub struct TimingTrack {
    frames: Vec<LevelDuration>,
    pos: usize,
}

impl TimingTrack {
    /// Decode a regenerated RAW payload
    ///
    /// The payload names the timing source file; its `RAW_Data` records are
    /// signed microsecond runs, positive for carrier-on and negative for
    /// carrier-off.
    pub fn from_raw_payload(payload: &str, storage: &dyn Storage) -> Result<Self, TxError> {
        let records = CaptureText::new(payload.to_string());
        let text = match records.read_string(raw::FILE_NAME_KEY) {
            Some(source) => storage::read_to_string(storage, source.as_ref()).map_err(|e| {
                TxError::MalformedPayload(format!("raw source {} unreadable: {}", source, e))
            })?,
            // Inline RAW_Data records, used by directly built descriptors
            None => payload.to_string(),
        };

        let capture = CaptureText::new(text);
        let mut frames = Vec::new();
        for record in capture.read_all("RAW_Data") {
            for token in record.split_ascii_whitespace() {
                let run: i32 = token.parse().map_err(|_| {
                    TxError::MalformedPayload(format!("bad RAW_Data value: {}", token))
                })?;
                if run == 0 {
                    return Err(TxError::MalformedPayload("zero-length run".to_string()));
                }
                frames.push(LevelDuration {
                    level: run > 0,
                    duration_us: run.unsigned_abs(),
                });
            }
        }
        if frames.is_empty() {
            return Err(TxError::MalformedPayload("no RAW_Data records".to_string()));
        }
        debug!("raw track decoded: {} frames", frames.len());
        Ok(Self { frames, pos: 0 })
    }

    /// Encode a Princeton-style fixed key
    ///
    /// `Key` is a hex byte string, `Bit` the number of significant bits
    /// (MSB first), `TE` the base pulse in microseconds (default 400).
    /// A set bit is 3·te on / te off, a clear bit te on / 3·te off, and the
    /// burst ends with a te on / 30·te off guard.
    pub fn from_princeton_payload(payload: &str) -> Result<Self, TxError> {
        let records = CaptureText::new(payload.to_string());

        let key_text = records
            .read_string("Key")
            .ok_or_else(|| TxError::MalformedPayload("no Key record".to_string()))?;
        let mut key: u64 = 0;
        let mut key_bytes = 0usize;
        for byte_text in key_text.split_ascii_whitespace() {
            let byte = u8::from_str_radix(byte_text, 16).map_err(|_| {
                TxError::MalformedPayload(format!("bad Key byte: {}", byte_text))
            })?;
            key = (key << 8) | u64::from(byte);
            key_bytes += 1;
        }
        if key_bytes > 8 {
            return Err(TxError::MalformedPayload(format!(
                "Key longer than 8 bytes: {}",
                key_bytes
            )));
        }

        let bits: u32 = records
            .read_string("Bit")
            .ok_or_else(|| TxError::MalformedPayload("no Bit record".to_string()))?
            .parse()
            .map_err(|_| TxError::MalformedPayload("bad Bit record".to_string()))?;
        if bits == 0 || bits > 64 {
            return Err(TxError::MalformedPayload(format!(
                "bit count out of range: {}",
                bits
            )));
        }

        let te: u32 = match records.read_string("TE") {
            Some(text) => text
                .parse()
                .map_err(|_| TxError::MalformedPayload("bad TE record".to_string()))?,
            None => 400,
        };
        if te == 0 {
            return Err(TxError::MalformedPayload("zero TE".to_string()));
        }
        // 30·te is the longest pulse in the burst; if it fits, they all do.
        let guard_us = te
            .checked_mul(30)
            .ok_or_else(|| TxError::MalformedPayload(format!("TE out of range: {}", te)))?;

        let mut frames = Vec::with_capacity(bits as usize * 2 + 2);
        for i in (0..bits).rev() {
            if key >> i & 1 == 1 {
                frames.push(LevelDuration::high(3 * te));
                frames.push(LevelDuration::low(te));
            } else {
                frames.push(LevelDuration::high(te));
                frames.push(LevelDuration::low(3 * te));
            }
        }
        frames.push(LevelDuration::high(te));
        frames.push(LevelDuration::low(guard_us));

        debug!("princeton track encoded: {} bits, te {} us", bits, te);
        Ok(Self { frames, pos: 0 })
    }

    /// Total number of frames in the track
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the track holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for TimingTrack {
    fn next_frame(&mut self) -> Option<LevelDuration> {
        let frame = self.frames.get(self.pos).copied();
        if frame.is_some() {
            self.pos += 1;
        }
        frame
    }
}
