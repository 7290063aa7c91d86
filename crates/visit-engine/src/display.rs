//! Human-readable rendering of times for form messages and notifications.

use crate::clock::{TimeRange, TimeSlot};

/// 12-hour clock rendering, e.g. `9:00 AM`, `12:30 PM`, `12:00 AM`.
pub fn format_12h(time: TimeSlot) -> String {
    let (hour, suffix) = match time.hour() {
        0 => (12, "AM"),
        h @ 1..=11 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, time.minute(), suffix)
}

/// `9:00 AM - 11:00 AM`
pub fn format_time_range(range: &TimeRange) -> String {
    format!("{} - {}", format_12h(range.start), format_12h(range.end))
}
