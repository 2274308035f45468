//! Wall-clock sources

use std::sync::Mutex;

use jiff::Zoned;

use crate::time::WallTime;

/// A source of the current time-of-day
pub trait Clock: Send + Sync {
    fn now(&self) -> WallTime;
}

/// The host's real clock, in the local time zone
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallTime {
        let now = Zoned::now();
        WallTime::new(now.hour() as u8, now.minute() as u8, now.second() as u8)
    }
}

/// A hand-driven clock for tests
pub struct ManualClock {
    now: Mutex<WallTime>,
}

impl ManualClock {
    pub fn new(now: WallTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to a new reading
    pub fn set(&self, now: WallTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> WallTime {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or(WallTime::new(0, 0, 0))
    }
}
