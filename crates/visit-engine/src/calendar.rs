//! Weekly calendar: is a calendar date an open day for a doctor?

use chrono::NaiveDate;

use crate::schedule::{DoctorSchedule, Weekday};

/// True when the doctor sees patients on the weekday of `date`.
///
/// Past and future dates are treated alike. With no schedule (no doctor
/// selected yet) every date is available.
pub fn is_date_available(date: NaiveDate, schedule: Option<&DoctorSchedule>) -> bool {
    match schedule {
        Some(s) => s.weekly_schedule.is_open(Weekday::of(date)),
        None => true,
    }
}

/// Weekdays the doctor is open, Monday first. All seven without a schedule.
pub fn enabled_weekdays(schedule: Option<&DoctorSchedule>) -> Vec<Weekday> {
    match schedule {
        Some(s) => s.weekly_schedule.open_days(),
        None => Weekday::ALL.to_vec(),
    }
}
