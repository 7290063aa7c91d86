//! Tests for date and time availability queries.

use chrono::NaiveDate;
use visit_engine::{
    availability_calendar, check_availability, get_available_time_slots, is_time_available,
    DoctorSchedule, PeriodName, SchedulingRules, TimeSlot, VisitingPeriod, Weekday,
    WeeklySchedule,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn t(s: &str) -> TimeSlot {
    TimeSlot::parse(s).unwrap()
}

fn rules() -> SchedulingRules {
    SchedulingRules::default()
}

/// Closed Sundays, slots 10:00 and 10:30.
fn ten_to_eleven() -> DoctorSchedule {
    DoctorSchedule::default()
        .with_weekly(WeeklySchedule::closed_on(&[Weekday::Sunday]))
        .with_period(PeriodName::Morning, VisitingPeriod::open("10:00", "11:00"))
}

const MONDAY: &str = "2026-03-16";
const SUNDAY: &str = "2026-03-15";

// ── Slots per date ──────────────────────────────────────────────────────────

#[test]
fn closed_day_has_no_slots_even_with_hours() {
    let schedule = ten_to_eleven();
    assert!(get_available_time_slots(Some(&schedule), date(SUNDAY), &rules()).is_empty());
}

#[test]
fn open_day_returns_generated_slots() {
    let schedule = ten_to_eleven();
    let slots = get_available_time_slots(Some(&schedule), date(MONDAY), &rules());
    assert_eq!(slots, vec![t("10:00"), t("10:30")]);
}

#[test]
fn no_schedule_has_no_slots() {
    assert!(get_available_time_slots(None, date(MONDAY), &rules()).is_empty());
}

// ── Tolerance window ────────────────────────────────────────────────────────

#[test]
fn time_between_slots_is_within_tolerance() {
    let schedule = ten_to_eleven();
    assert!(is_time_available(t("10:15"), Some(&schedule), date(MONDAY), &rules()));
}

#[test]
fn end_of_visiting_hours_is_rejected() {
    let schedule = ten_to_eleven();
    assert!(!is_time_available(t("11:00"), Some(&schedule), date(MONDAY), &rules()));
}

#[test]
fn time_just_inside_tolerance_is_accepted() {
    let schedule = ten_to_eleven();
    assert!(is_time_available(t("10:59"), Some(&schedule), date(MONDAY), &rules()));
    assert!(is_time_available(t("09:31"), Some(&schedule), date(MONDAY), &rules()));
}

#[test]
fn time_at_or_beyond_tolerance_is_rejected() {
    let schedule = ten_to_eleven();
    assert!(!is_time_available(t("09:30"), Some(&schedule), date(MONDAY), &rules()));
    assert!(!is_time_available(t("11:30"), Some(&schedule), date(MONDAY), &rules()));
}

#[test]
fn exact_slot_matches() {
    let schedule = ten_to_eleven();
    assert!(is_time_available(t("10:00"), Some(&schedule), date(MONDAY), &rules()));
    assert!(is_time_available(t("10:30"), Some(&schedule), date(MONDAY), &rules()));
}

#[test]
fn any_time_on_closed_day_is_rejected() {
    let schedule = ten_to_eleven();
    assert!(!is_time_available(t("10:00"), Some(&schedule), date(SUNDAY), &rules()));
}

#[test]
fn narrower_tolerance_tightens_matching() {
    let schedule = ten_to_eleven();
    let strict = SchedulingRules {
        tolerance_minutes: 0,
        ..rules()
    };
    assert!(is_time_available(t("10:30"), Some(&schedule), date(MONDAY), &strict));
    assert!(!is_time_available(t("10:15"), Some(&schedule), date(MONDAY), &strict));
}

// ── No configured hours ─────────────────────────────────────────────────────

#[test]
fn all_periods_disabled_accepts_any_time() {
    let mut off = VisitingPeriod::open("09:00", "12:00");
    off.enabled = false;
    let schedule = DoctorSchedule::default()
        .with_period(PeriodName::Morning, off.clone())
        .with_period(PeriodName::Afternoon, off.clone())
        .with_period(PeriodName::Evening, off);

    for time in ["00:00", "03:17", "12:00", "23:59"] {
        assert!(is_time_available(t(time), Some(&schedule), date(MONDAY), &rules()), "{time}");
    }
}

#[test]
fn no_hours_still_respects_closed_days() {
    let schedule = DoctorSchedule::default().with_weekly(WeeklySchedule::closed_on(&[Weekday::Sunday]));
    assert!(!is_time_available(t("10:00"), Some(&schedule), date(SUNDAY), &rules()));
}

#[test]
fn no_schedule_accepts_any_time() {
    assert!(is_time_available(t("04:00"), None, date(SUNDAY), &rules()));
}

// ── Availability records ────────────────────────────────────────────────────

#[test]
fn check_availability_reports_date_bookability_and_slots() {
    let schedule = ten_to_eleven();

    let monday = check_availability(Some(&schedule), date(MONDAY), &rules());
    assert!(monday.bookable);
    assert_eq!(monday.slots.len(), 2);

    let sunday = check_availability(Some(&schedule), date(SUNDAY), &rules());
    assert!(!sunday.bookable);
    assert!(sunday.slots.is_empty());
}

#[test]
fn availability_calendar_covers_consecutive_days() {
    let schedule = ten_to_eleven();
    let days = availability_calendar(Some(&schedule), date(MONDAY), 14, &rules());

    assert_eq!(days.len(), 14);
    assert_eq!(days[0].date, date(MONDAY));
    assert_eq!(days[13].date, date("2026-03-29"));
    let closed: Vec<NaiveDate> = days.iter().filter(|d| !d.bookable).map(|d| d.date).collect();
    assert_eq!(closed, vec![date("2026-03-22"), date("2026-03-29")]);
}

#[test]
fn availability_result_serializes_iso_date_and_hhmm_slots() {
    let schedule = ten_to_eleven();
    let result = check_availability(Some(&schedule), date(MONDAY), &rules());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["date"], "2026-03-16");
    assert_eq!(json["bookable"], true);
    assert_eq!(json["slots"], serde_json::json!(["10:00", "10:30"]));
}
