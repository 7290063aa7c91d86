//! # visit-engine
//!
//! Doctor visiting-hours availability and appointment-slot scheduling for
//! out-patient front desks.
//!
//! Every operation is a pure function of an immutable [`DoctorSchedule`]
//! snapshot and a calendar date or time. Nothing here performs I/O or keeps
//! state between calls; fetching and caching doctor records is the caller's job.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use visit_engine::{validate_and_correct, DoctorSchedule, SchedulingRules, TimeSlot};
//!
//! let schedule = DoctorSchedule::from_json(r#"{
//!     "weeklySchedule": {"sunday": false},
//!     "visitingHours": {"morning": {"enabled": true, "start": "09:00", "end": "11:00"}}
//! }"#).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
//! let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let decision = validate_and_correct(
//!     Some(&schedule),
//!     sunday,
//!     TimeSlot::parse("10:00").unwrap(),
//!     today,
//!     &SchedulingRules::default(),
//! );
//! assert!(decision.corrected());
//! assert_eq!(decision.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
//! assert_eq!(decision.time.to_string(), "09:00");
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] - doctor schedule data model and weekday defaults
//! - [`clock`] - `HH:MM` time-of-day values
//! - [`calendar`] - is a date an open day?
//! - [`slots`] - visiting periods → sorted, deduplicated slots
//! - [`availability`] - date and time availability queries
//! - [`finder`] - next open day within the horizon
//! - [`booking`] - accept, correct, or reject a proposed booking
//! - [`session`] - booking form state machine
//! - [`display`] - 12-hour rendering for messages
//! - [`rules`] - slot width, tolerance, and horizon
//! - [`error`] - error types

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod display;
pub mod error;
pub mod finder;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod slots;

pub use availability::{
    availability_calendar, check_availability, get_available_time_slots, is_time_available,
    AvailabilityResult, NO_CONFIGURED_HOURS_MEANS_UNRESTRICTED,
};
pub use booking::{validate_and_correct, BookingDecision, BookingStatus, DecisionReason};
pub use calendar::{enabled_weekdays, is_date_available};
pub use clock::{TimeRange, TimeSlot};
pub use error::EngineError;
pub use finder::{get_next_available_date, get_next_available_date_from_today, NextAvailable};
pub use rules::SchedulingRules;
pub use schedule::{
    parse_date, DoctorSchedule, PeriodName, VisitingHours, VisitingPeriod, WeeklySchedule, Weekday,
};
pub use session::{BookingRequest, BookingSession, SessionState};
pub use slots::{first_enabled_window, generate_slots};
