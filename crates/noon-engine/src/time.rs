//! Trigger time and its comparator

use std::fmt;

/// A wall-clock reading, seconds resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Hour of day, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
}

impl WallTime {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// The user-configured target time-of-day
///
/// Bounded by construction and mutated only through the editor; every field
/// stays within its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TriggerTime {
    /// Target from a clock reading, clamped into range
    pub fn from_wall(now: WallTime) -> Self {
        Self {
            hour: now.hour.min(23),
            minute: now.minute.min(59),
            second: now.second.min(59),
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub(crate) fn set_hour(&mut self, hour: u8) {
        debug_assert!(hour <= 23);
        self.hour = hour;
    }

    pub(crate) fn set_minute(&mut self, minute: u8) {
        debug_assert!(minute <= 59);
        self.minute = minute;
    }

    pub(crate) fn set_second(&mut self, second: u8) {
        debug_assert!(second <= 59);
        self.second = second;
    }

    /// Whether the target has been reached
    ///
    /// Only fires within the exact target hour: at or past the target second
    /// in the target minute, or anywhere in a later minute of that hour. If
    /// the target hour has already passed, this stays false until the same
    /// hour comes around again. Known limitation of the comparison, kept
    /// as-is pending product confirmation; see DESIGN.md.
    pub fn is_due(&self, now: WallTime) -> bool {
        if now.hour != self.hour {
            return false;
        }
        if now.minute == self.minute {
            now.second >= self.second
        } else {
            now.minute >= self.minute
        }
    }
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
