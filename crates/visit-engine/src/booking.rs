//! Validate a proposed booking and correct it toward the doctor's real schedule.
//!
//! Correction is preferred over rejection. A closed day moves to the next open
//! day; a time outside visiting hours moves to the first slot of that day. A
//! proposal is rejected only when no open day exists within the horizon, and
//! the rejection names the weekdays the doctor does see patients.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::{get_available_time_slots, is_time_available};
use crate::calendar::{enabled_weekdays, is_date_available};
use crate::clock::TimeSlot;
use crate::finder::get_next_available_date;
use crate::rules::SchedulingRules;
use crate::schedule::{DoctorSchedule, Weekday};

/// Outcome category of a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Valid,
    AutoCorrected,
    Rejected,
}

/// Why a proposal was corrected or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// The requested weekday is closed; moved to the next open day.
    DayUnavailable {
        requested: NaiveDate,
        requested_weekday: Weekday,
        moved_to: NaiveDate,
    },
    /// The requested time is outside visiting hours; moved to the first slot.
    TimeOutsideHours {
        requested: TimeSlot,
        moved_to: TimeSlot,
    },
    /// No open day within the horizon.
    NoOpenDay {
        horizon_days: u32,
        open_weekdays: Vec<Weekday>,
    },
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::DayUnavailable {
                requested,
                requested_weekday,
                moved_to,
            } => write!(
                f,
                "Doctor is not available on {} ({}); moved to next open day {} ({})",
                requested_weekday,
                requested,
                Weekday::of(*moved_to),
                moved_to
            ),
            DecisionReason::TimeOutsideHours {
                requested,
                moved_to,
            } => write!(
                f,
                "{} is outside visiting hours; moved to first available slot {}",
                requested, moved_to
            ),
            DecisionReason::NoOpenDay {
                horizon_days,
                open_weekdays,
            } => {
                if open_weekdays.is_empty() {
                    write!(
                        f,
                        "Doctor has no open days in the next {} days; no visiting days are configured",
                        horizon_days
                    )
                } else {
                    let names: Vec<String> =
                        open_weekdays.iter().map(|d| d.to_string()).collect();
                    write!(
                        f,
                        "Doctor has no open days in the next {} days; available on: {}",
                        horizon_days,
                        names.join(", ")
                    )
                }
            }
        }
    }
}

/// Result of [`validate_and_correct`]. On rejection `date` and `time` are the
/// proposal as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDecision {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DecisionReason>,
}

impl BookingDecision {
    fn valid(date: NaiveDate, time: TimeSlot) -> Self {
        Self {
            date,
            time,
            status: BookingStatus::Valid,
            reason: None,
        }
    }

    pub fn corrected(&self) -> bool {
        self.status == BookingStatus::AutoCorrected
    }

    pub fn is_rejected(&self) -> bool {
        self.status == BookingStatus::Rejected
    }

    /// True for decisions a booking may be submitted with.
    pub fn is_bookable(&self) -> bool {
        !self.is_rejected()
    }
}

/// Accept, correct, or reject a proposed appointment.
///
/// `today` anchors the forward search used when `date` is a closed day.
pub fn validate_and_correct(
    schedule: Option<&DoctorSchedule>,
    date: NaiveDate,
    time: TimeSlot,
    today: NaiveDate,
    rules: &SchedulingRules,
) -> BookingDecision {
    if !is_date_available(date, schedule) {
        return match get_next_available_date(schedule, today, rules) {
            Some(next) => {
                let moved_time = next.first_time().unwrap_or(time);
                debug!(%date, moved_to = %next.date, time = %moved_time, "closed day corrected");
                BookingDecision {
                    date: next.date,
                    time: moved_time,
                    status: BookingStatus::AutoCorrected,
                    reason: Some(DecisionReason::DayUnavailable {
                        requested: date,
                        requested_weekday: Weekday::of(date),
                        moved_to: next.date,
                    }),
                }
            }
            None => {
                debug!(%date, "closed day rejected, horizon exhausted");
                BookingDecision {
                    date,
                    time,
                    status: BookingStatus::Rejected,
                    reason: Some(DecisionReason::NoOpenDay {
                        horizon_days: rules.horizon_days,
                        open_weekdays: enabled_weekdays(schedule),
                    }),
                }
            }
        };
    }

    if !is_time_available(time, schedule, date, rules) {
        // Only reachable with configured slots; an empty slot list accepts any time.
        if let Some(first) = get_available_time_slots(schedule, date, rules).first() {
            debug!(%date, %time, moved_to = %first, "time outside visiting hours corrected");
            return BookingDecision {
                date,
                time: *first,
                status: BookingStatus::AutoCorrected,
                reason: Some(DecisionReason::TimeOutsideHours {
                    requested: time,
                    moved_to: *first,
                }),
            };
        }
    }

    BookingDecision::valid(date, time)
}
