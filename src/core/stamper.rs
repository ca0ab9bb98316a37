//! ScheduleTimeStamper: forward minute offset → "h:mm AM/PM"

use chrono::{Duration, NaiveDateTime};
use crate::core::clock::Clock;
use crate::types::ScheduleEntry;

/// Stamp `offset_minutes` from the clock's current time
pub fn stamp(clock: &dyn Clock, offset_minutes: u32) -> ScheduleEntry {
    stamp_from(clock.now(), offset_minutes)
}

/// Stamp `offset_minutes` after `now`
pub fn stamp_from(now: NaiveDateTime, offset_minutes: u32) -> ScheduleEntry {
    let at = now + Duration::minutes(i64::from(offset_minutes));
    ScheduleEntry {
        offset_minutes,
        // %-I: 12-hour clock without padding, hour 0 renders as 12
        text: at.format("%-I:%M %p").to_string(),
    }
}
