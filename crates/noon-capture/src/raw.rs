//! Canonical payload regeneration for RAW captures
//!
//! RAW captures replay microsecond timing data streamed from the capture
//! file itself, so the descriptor payload is not a copy of the serialized
//! stream: it is a small regenerated record set that points the encoder back
//! at the source file.

use std::path::Path;

/// Record naming the timing source file inside a regenerated payload
pub const FILE_NAME_KEY: &str = "File_name";

/// Build the canonical descriptor payload for a RAW capture at `source`
pub fn regenerate_payload(source: &Path) -> String {
    format!("Protocol: RAW\n{}: {}\n", FILE_NAME_KEY, source.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::CaptureText;
    use std::path::PathBuf;

    #[test]
    fn test_payload_names_source_file() {
        let payload = regenerate_payload(&PathBuf::from("/ext/captures/gate.sub"));
        let records = CaptureText::new(payload);
        assert_eq!(records.read_string("Protocol"), Some("RAW"));
        assert_eq!(
            records.read_string(FILE_NAME_KEY),
            Some("/ext/captures/gate.sub")
        );
    }

    #[test]
    fn test_regeneration_is_deterministic() {
        let path = PathBuf::from("a/b.sub");
        assert_eq!(regenerate_payload(&path), regenerate_payload(&path));
    }
}
