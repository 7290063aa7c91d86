//! Tests for weekday availability.

use chrono::{Days, NaiveDate};
use visit_engine::{enabled_weekdays, is_date_available, DoctorSchedule, Weekday, WeeklySchedule};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn closed_on(days: &[Weekday]) -> DoctorSchedule {
    DoctorSchedule::default().with_weekly(WeeklySchedule::closed_on(days))
}

#[test]
fn closed_weekday_is_unavailable() {
    let schedule = closed_on(&[Weekday::Sunday]);

    assert!(!is_date_available(date("2026-03-15"), Some(&schedule))); // Sunday
    assert!(is_date_available(date("2026-03-16"), Some(&schedule))); // Monday
}

#[test]
fn weekday_follows_gregorian_calendar_across_a_full_week() {
    let schedule = closed_on(&[Weekday::Wednesday]);
    let monday = date("2026-03-16");

    let open: Vec<bool> = (0..7)
        .map(|i| is_date_available(monday + Days::new(i), Some(&schedule)))
        .collect();
    assert_eq!(open, vec![true, true, false, true, true, true, true]);
}

#[test]
fn past_dates_are_evaluated_the_same_way() {
    let schedule = closed_on(&[Weekday::Saturday]);

    assert!(!is_date_available(date("2000-01-01"), Some(&schedule))); // Saturday
    assert!(is_date_available(date("2000-01-03"), Some(&schedule))); // Monday
}

#[test]
fn leap_day_resolves_weekday() {
    let schedule = closed_on(&[Weekday::Thursday]);
    assert!(!is_date_available(date("2024-02-29"), Some(&schedule))); // Thursday
}

#[test]
fn no_schedule_means_every_day_is_available() {
    assert!(is_date_available(date("2026-03-15"), None));
    assert_eq!(enabled_weekdays(None).len(), 7);
}

#[test]
fn enabled_weekdays_lists_open_days_in_week_order() {
    let schedule = closed_on(&[Weekday::Monday, Weekday::Wednesday, Weekday::Friday, Weekday::Sunday]);

    assert_eq!(
        enabled_weekdays(Some(&schedule)),
        vec![Weekday::Tuesday, Weekday::Thursday, Weekday::Saturday]
    );
}
