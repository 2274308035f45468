//! Bounded editor over the trigger time

use crate::time::TriggerTime;

/// Which field of the trigger time edits apply to
///
/// A linear cursor: left/right navigation clamps at `None` and `Seconds`
/// rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditCursor {
    /// No field selected; adjustments are ignored
    #[default]
    None,
    Hours,
    Minutes,
    Seconds,
}

impl EditCursor {
    const ORDER: [EditCursor; 4] = [
        EditCursor::None,
        EditCursor::Hours,
        EditCursor::Minutes,
        EditCursor::Seconds,
    ];

    /// Cursor after moving one step, clamped at either end
    pub fn moved(self, delta: i8) -> EditCursor {
        let pos = Self::ORDER
            .iter()
            .position(|c| *c == self)
            .unwrap_or(0) as i8;
        let next = (pos + delta.signum()).clamp(0, Self::ORDER.len() as i8 - 1);
        Self::ORDER[next as usize]
    }
}

/// Apply a bounded step to one field value
///
/// Returns the new value, or `None` if the step would leave `0..=max`.
fn stepped(value: u8, delta: i8, max: u8) -> Option<u8> {
    if delta >= 0 {
        let next = value.checked_add(delta as u8)?;
        (next <= max).then_some(next)
    } else {
        value.checked_sub(delta.unsigned_abs())
    }
}

/// Adjust the field under the cursor by one step
///
/// Out-of-bounds steps are rejected and leave the time untouched. Returns
/// whether the time was mutated; the caller re-arms the trigger on any
/// accepted edit.
pub fn adjust(time: &mut TriggerTime, cursor: EditCursor, delta: i8) -> bool {
    match cursor {
        EditCursor::None => false,
        EditCursor::Hours => match stepped(time.hour(), delta, 23) {
            Some(hour) => {
                time.set_hour(hour);
                true
            }
            None => false,
        },
        EditCursor::Minutes => match stepped(time.minute(), delta, 59) {
            Some(minute) => {
                time.set_minute(minute);
                true
            }
            None => false,
        },
        EditCursor::Seconds => match stepped(time.second(), delta, 59) {
            Some(second) => {
                time.set_second(second);
                true
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::WallTime;

    fn time(hour: u8, minute: u8, second: u8) -> TriggerTime {
        TriggerTime::from_wall(WallTime::new(hour, minute, second))
    }

    #[test]
    fn test_cursor_walks_right_and_clamps() {
        let mut cursor = EditCursor::None;
        cursor = cursor.moved(1);
        assert_eq!(cursor, EditCursor::Hours);
        cursor = cursor.moved(1);
        assert_eq!(cursor, EditCursor::Minutes);
        cursor = cursor.moved(1);
        assert_eq!(cursor, EditCursor::Seconds);
        cursor = cursor.moved(1);
        assert_eq!(cursor, EditCursor::Seconds, "clamped at the right end");
    }

    #[test]
    fn test_cursor_clamps_at_none() {
        assert_eq!(EditCursor::None.moved(-1), EditCursor::None);
    }

    #[test]
    fn test_adjust_with_no_cursor_is_ignored() {
        let mut t = time(12, 0, 0);
        assert!(!adjust(&mut t, EditCursor::None, 1));
        assert_eq!(t, time(12, 0, 0));
    }

    #[test]
    fn test_adjust_increments_selected_field() {
        let mut t = time(12, 30, 15);
        assert!(adjust(&mut t, EditCursor::Hours, 1));
        assert_eq!(t, time(13, 30, 15));
        assert!(adjust(&mut t, EditCursor::Seconds, -1));
        assert_eq!(t, time(13, 30, 14));
    }

    #[test]
    fn test_adjust_rejects_out_of_bounds() {
        let mut t = time(23, 59, 0);
        assert!(!adjust(&mut t, EditCursor::Hours, 1));
        assert!(!adjust(&mut t, EditCursor::Minutes, 1));
        assert!(!adjust(&mut t, EditCursor::Seconds, -1));
        assert_eq!(t, time(23, 59, 0), "rejected edits leave the time alone");
    }
}
