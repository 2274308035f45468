//! Hardware modulation presets
//!
//! Capture files name the modulation/bandwidth configuration the recording
//! was made with. The recognized names map to a closed set of variants; a
//! present-but-unrecognized name becomes [`Preset::Custom`] and is passed
//! through to the radio stack untouched rather than silently dropped.

/// A named hardware modulation/bandwidth configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preset {
    /// OOK, 270 kHz bandwidth
    Ook270,
    /// OOK, 650 kHz bandwidth
    Ook650,
    /// 2FSK, 2.38 kHz deviation
    Fsk2Dev238,
    /// 2FSK, 47.6 kHz deviation
    Fsk2Dev476,
    /// MSK, 99.97 kbit/s
    Msk99_97Kb,
    /// Unrecognized preset name, carried through verbatim
    Custom(String),
}

/// Recognized capture-file preset names
const PRESET_TABLE: &[(&str, Preset)] = &[
    ("FuriHalSubGhzPresetOok270Async", Preset::Ook270),
    ("FuriHalSubGhzPresetOok650Async", Preset::Ook650),
    ("FuriHalSubGhzPreset2FSKDev238Async", Preset::Fsk2Dev238),
    ("FuriHalSubGhzPreset2FSKDev476Async", Preset::Fsk2Dev476),
    ("FuriHalSubGhzPresetMSK99_97KbAsync", Preset::Msk99_97Kb),
];

impl Preset {
    /// Map a capture-file preset name to its variant
    pub fn from_name(name: &str) -> Preset {
        PRESET_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p.clone())
            .unwrap_or_else(|| Preset::Custom(name.to_string()))
    }

    /// The capture-file name for this preset
    pub fn name(&self) -> &str {
        match self {
            Preset::Custom(name) => name,
            _ => {
                // Closed variants always appear in the table.
                PRESET_TABLE
                    .iter()
                    .find(|(_, p)| p == self)
                    .map(|(n, _)| *n)
                    .unwrap_or("")
            }
        }
    }

    /// Whether this is a passthrough preset the stack must interpret itself
    pub fn is_custom(&self) -> bool {
        matches!(self, Preset::Custom(_))
    }
}
