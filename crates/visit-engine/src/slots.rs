//! Expand visiting periods into discrete bookable slots.
//!
//! Each enabled period `[start, end)` is walked in fixed steps of
//! `slot_minutes`; the end time itself is never emitted. Periods are expanded
//! independently, so overlapping periods produce duplicates that are removed
//! after sorting.

use chrono::NaiveDate;

use crate::clock::{TimeRange, TimeSlot};
use crate::rules::SchedulingRules;
use crate::schedule::{DoctorSchedule, VisitingHours};

/// Slots for `date` from the doctor's visiting hours, sorted and deduplicated.
///
/// Does not consult the weekly calendar; see
/// [`get_available_time_slots`](crate::availability::get_available_time_slots)
/// for the composed query. Visiting hours are the same on every open day, so
/// `date` does not change the result today.
pub fn generate_slots(
    _date: NaiveDate,
    schedule: &DoctorSchedule,
    rules: &SchedulingRules,
) -> Vec<TimeSlot> {
    expand_visiting_hours(&schedule.visiting_hours, rules.slot_minutes)
}

/// Expand every enabled period of `hours` in `step_minutes` increments.
///
/// Disabled periods, periods with a missing or unparseable bound, and periods
/// with `start >= end` contribute nothing. A zero step yields no slots.
pub fn expand_visiting_hours(hours: &VisitingHours, step_minutes: u32) -> Vec<TimeSlot> {
    if step_minutes == 0 {
        return Vec::new();
    }

    let mut slots: Vec<TimeSlot> = hours
        .periods()
        .filter_map(|(_, period)| period.bounds())
        .flat_map(|range| expand_range(range, step_minutes))
        .collect();

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Half-open walk from `range.start` toward `range.end`.
fn expand_range(range: TimeRange, step_minutes: u32) -> Vec<TimeSlot> {
    let mut out = Vec::new();
    let mut current = Some(range.start);
    while let Some(slot) = current {
        if slot >= range.end {
            break;
        }
        out.push(slot);
        current = slot.checked_add_minutes(step_minutes);
    }
    out
}

/// First enabled period with parseable bounds, in morning, afternoon, evening
/// order. Inverted bounds are returned as declared; such a period contributes
/// no slots, so its start is the only time it offers.
pub fn first_enabled_window(schedule: &DoctorSchedule) -> Option<TimeRange> {
    schedule
        .visiting_hours
        .periods()
        .find_map(|(_, period)| period.bounds())
}
