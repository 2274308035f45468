//! Newline-delimited key/value capture format
//!
//! Capture files are produced by an external recording tool as a sequence of
//! `Key: value` lines. Lookups return the first matching record; payload
//! records (for example repeated `RAW_Data` lines) are left in place and read
//! by the protocol encoders.

/// An in-memory capture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureText {
    text: String,
}

impl CaptureText {
    /// Wrap already-read capture text
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// First value recorded under `key`, trimmed
    pub fn read_string(&self, key: &str) -> Option<&str> {
        self.records().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// First value recorded under `key`, parsed as an unsigned integer
    pub fn read_u32(&self, key: &str) -> Option<u32> {
        self.read_string(key).and_then(|v| v.parse().ok())
    }

    /// All values recorded under `key`, in file order
    pub fn read_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.records()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Iterate over every `Key: value` record
    pub fn records(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim(), v.trim()))
    }

    /// The underlying serialized stream, verbatim
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// Consume the reader, returning the serialized stream verbatim
    pub fn into_text(self) -> String {
        self.text
    }
}
