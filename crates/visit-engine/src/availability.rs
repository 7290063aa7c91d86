//! Availability queries composed from the weekly calendar and slot generation.
//!
//! A doctor record with no configured visiting hours yields no slots. That is
//! read as "unrestricted": any time on an open day is accepted. Older records
//! lack visiting hours entirely and must stay bookable.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::is_date_available;
use crate::clock::TimeSlot;
use crate::rules::SchedulingRules;
use crate::schedule::DoctorSchedule;
use crate::slots::generate_slots;

/// An open day with no slots accepts any time.
pub const NO_CONFIGURED_HOURS_MEANS_UNRESTRICTED: bool = true;

/// Availability of one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub date: NaiveDate,
    pub bookable: bool,
    pub slots: Vec<TimeSlot>,
}

/// Slots bookable on `date`: empty when the weekday is closed.
pub fn get_available_time_slots(
    schedule: Option<&DoctorSchedule>,
    date: NaiveDate,
    rules: &SchedulingRules,
) -> Vec<TimeSlot> {
    if !is_date_available(date, schedule) {
        return Vec::new();
    }
    match schedule {
        Some(s) => generate_slots(date, s, rules),
        None => Vec::new(),
    }
}

/// True when `time` may be booked on `date`.
///
/// The date must be open. With slots configured, `time` must be a slot start
/// or lie less than `rules.tolerance_minutes` away from one.
pub fn is_time_available(
    time: TimeSlot,
    schedule: Option<&DoctorSchedule>,
    date: NaiveDate,
    rules: &SchedulingRules,
) -> bool {
    if !is_date_available(date, schedule) {
        return false;
    }
    let slots = get_available_time_slots(schedule, date, rules);
    if slots.is_empty() {
        return NO_CONFIGURED_HOURS_MEANS_UNRESTRICTED;
    }
    matches_any_slot(time, &slots, rules.tolerance_minutes)
}

/// True when `time` equals a slot or is closer than `tolerance_minutes` to one.
///
/// A time a full slot width past the last slot is the end of visiting hours
/// and does not match.
pub fn matches_any_slot(time: TimeSlot, slots: &[TimeSlot], tolerance_minutes: u32) -> bool {
    slots.iter().any(|slot| {
        let distance = time.distance(*slot);
        distance == 0 || distance < tolerance_minutes
    })
}

/// Bookability and slots of a single date.
pub fn check_availability(
    schedule: Option<&DoctorSchedule>,
    date: NaiveDate,
    rules: &SchedulingRules,
) -> AvailabilityResult {
    AvailabilityResult {
        date,
        bookable: is_date_available(date, schedule),
        slots: get_available_time_slots(schedule, date, rules),
    }
}

/// One [`AvailabilityResult`] per day for `days` consecutive days from `from`.
///
/// Used by date pickers to grey out closed days. Stops early at the end of the
/// representable calendar.
pub fn availability_calendar(
    schedule: Option<&DoctorSchedule>,
    from: NaiveDate,
    days: u32,
    rules: &SchedulingRules,
) -> Vec<AvailabilityResult> {
    (0..days)
        .map_while(|offset| from.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| check_availability(schedule, date, rules))
        .collect()
}
