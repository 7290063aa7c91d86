//! Tests for 12-hour rendering.

use visit_engine::display::{format_12h, format_time_range};
use visit_engine::{TimeRange, TimeSlot};

fn t(s: &str) -> TimeSlot {
    TimeSlot::parse(s).unwrap()
}

#[test]
fn renders_morning_and_afternoon() {
    assert_eq!(format_12h(t("09:00")), "9:00 AM");
    assert_eq!(format_12h(t("13:05")), "1:05 PM");
}

#[test]
fn renders_noon_and_midnight() {
    assert_eq!(format_12h(t("12:00")), "12:00 PM");
    assert_eq!(format_12h(t("00:30")), "12:30 AM");
}

#[test]
fn renders_range() {
    let range = TimeRange {
        start: t("09:00"),
        end: t("11:00"),
    };
    assert_eq!(format_time_range(&range), "9:00 AM - 11:00 AM");
}
