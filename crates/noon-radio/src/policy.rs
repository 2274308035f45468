//! Transmit legality policy
//!
//! A single pass/fail predicate keyed by frequency. Checked by the loader
//! before any radio state is touched.

use noon_capture::FrequencyPolicy;

/// Frequency ranges the transmitter hardware may legally use, in Hz
const ALLOWED_BANDS: &[(u32, u32)] = &[
    (300_000_000, 348_000_000),
    (387_000_000, 464_000_000),
    (779_000_000, 928_000_000),
];

/// Band-table legality policy matching the transmitter's supported ranges
#[derive(Debug, Default, Clone)]
pub struct RegionPolicy;

impl FrequencyPolicy for RegionPolicy {
    fn is_tx_allowed(&self, hz: u32) -> bool {
        ALLOWED_BANDS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&hz))
    }
}

/// Policy that permits every frequency; simulation and test use only
#[derive(Debug, Default, Clone)]
pub struct AllowAll;

impl FrequencyPolicy for AllowAll {
    fn is_tx_allowed(&self, _hz: u32) -> bool {
        true
    }
}
