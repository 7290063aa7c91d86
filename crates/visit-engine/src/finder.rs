//! Forward search for the next open day.
//!
//! The scan starts tomorrow, never today, and checks at most
//! `rules.horizon_days` consecutive days. Running out of horizon is reported as
//! `None`.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::is_date_available;
use crate::clock::{TimeRange, TimeSlot};
use crate::rules::SchedulingRules;
use crate::schedule::DoctorSchedule;
use crate::slots::{first_enabled_window, generate_slots};

/// The earliest open day after today and what can be booked on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAvailable {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    /// First enabled visiting period, for messaging. Rendering lives in
    /// [`display`](crate::display).
    pub time_range: Option<TimeRange>,
}

impl NextAvailable {
    /// First slot, or the start of the first enabled period when no slots exist.
    pub fn first_time(&self) -> Option<TimeSlot> {
        self.slots
            .first()
            .copied()
            .or_else(|| self.time_range.map(|r| r.start))
    }
}

/// Earliest open date in `today + 1 ..= today + horizon_days`.
pub fn get_next_available_date(
    schedule: Option<&DoctorSchedule>,
    today: NaiveDate,
    rules: &SchedulingRules,
) -> Option<NextAvailable> {
    for offset in 1..=u64::from(rules.horizon_days) {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        if !is_date_available(date, schedule) {
            continue;
        }

        debug!(%date, offset, "next open day found");
        let (slots, time_range) = match schedule {
            Some(s) => (generate_slots(date, s, rules), first_enabled_window(s)),
            None => (Vec::new(), None),
        };
        return Some(NextAvailable {
            date,
            slots,
            time_range,
        });
    }

    debug!(%today, horizon_days = rules.horizon_days, "no open day within horizon");
    None
}

/// [`get_next_available_date`] relative to the host's local calendar date.
pub fn get_next_available_date_from_today(
    schedule: Option<&DoctorSchedule>,
    rules: &SchedulingRules,
) -> Option<NextAvailable> {
    get_next_available_date(schedule, Local::now().date_naive(), rules)
}
