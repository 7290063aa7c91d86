//! Property-based tests for slot generation and availability.
//!
//! These check invariants that hold for any visiting hours, not just the
//! hand-picked cases in `slots_tests.rs`.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use visit_engine::slots::expand_visiting_hours;
use visit_engine::{
    get_available_time_slots, get_next_available_date, is_date_available, is_time_available,
    DoctorSchedule, SchedulingRules, TimeSlot, VisitingHours, VisitingPeriod, WeeklySchedule,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_hhmm() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}

fn arb_period() -> impl Strategy<Value = Option<VisitingPeriod>> {
    prop::option::of((any::<bool>(), arb_hhmm(), arb_hhmm()).prop_map(|(enabled, start, end)| {
        VisitingPeriod {
            enabled,
            start: Some(start),
            end: Some(end),
        }
    }))
}

fn arb_hours() -> impl Strategy<Value = VisitingHours> {
    (arb_period(), arb_period(), arb_period()).prop_map(|(morning, afternoon, evening)| {
        VisitingHours {
            morning,
            afternoon,
            evening,
        }
    })
}

fn arb_weekly() -> impl Strategy<Value = WeeklySchedule> {
    prop::array::uniform7(any::<bool>()).prop_map(|open| WeeklySchedule {
        monday: open[0],
        tuesday: open[1],
        wednesday: open[2],
        thursday: open[3],
        friday: open[4],
        saturday: open[5],
        sunday: open[6],
    })
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset))
}

fn arb_step() -> impl Strategy<Value = u32> {
    prop_oneof![Just(15u32), Just(20), Just(30), Just(45), Just(60)]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn slots_are_strictly_increasing(hours in arb_hours(), step in arb_step()) {
        let slots = expand_visiting_hours(&hours, step);
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn string_order_matches_time_order(hours in arb_hours(), step in arb_step()) {
        let rendered: Vec<String> = expand_visiting_hours(&hours, step)
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut sorted = rendered.clone();
        sorted.sort();
        prop_assert_eq!(rendered, sorted);
    }

    #[test]
    fn every_slot_lies_inside_an_enabled_period(hours in arb_hours(), step in arb_step()) {
        let windows: Vec<_> = hours.periods().filter_map(|(_, p)| p.bounds()).collect();
        for slot in expand_visiting_hours(&hours, step) {
            prop_assert!(
                windows.iter().any(|w| w.start <= slot && slot < w.end),
                "slot {} outside every window", slot
            );
        }
    }

    #[test]
    fn slot_count_never_exceeds_per_period_bound(hours in arb_hours(), step in arb_step()) {
        let bound: u32 = hours
            .periods()
            .filter_map(|(_, p)| p.bounds())
            .filter(|w| w.is_valid())
            .map(|w| (w.end.minutes() - w.start.minutes()).div_ceil(step))
            .sum();
        prop_assert!(expand_visiting_hours(&hours, step).len() as u32 <= bound);
    }

    #[test]
    fn closed_days_have_no_slots(
        weekly in arb_weekly(),
        hours in arb_hours(),
        date in arb_date(),
    ) {
        let schedule = DoctorSchedule { weekly_schedule: weekly, visiting_hours: hours };
        if !is_date_available(date, Some(&schedule)) {
            prop_assert!(get_available_time_slots(Some(&schedule), date, &SchedulingRules::default()).is_empty());
        }
    }

    #[test]
    fn generated_slots_are_always_bookable_times(
        weekly in arb_weekly(),
        hours in arb_hours(),
        date in arb_date(),
    ) {
        let schedule = DoctorSchedule { weekly_schedule: weekly, visiting_hours: hours };
        let rules = SchedulingRules::default();
        for slot in get_available_time_slots(Some(&schedule), date, &rules) {
            prop_assert!(is_time_available(slot, Some(&schedule), date, &rules));
        }
    }

    #[test]
    fn next_available_is_after_today_and_open(
        weekly in arb_weekly(),
        date in arb_date(),
    ) {
        let schedule = DoctorSchedule::default().with_weekly(weekly);
        let rules = SchedulingRules::default();
        match get_next_available_date(Some(&schedule), date, &rules) {
            Some(next) => {
                prop_assert!(next.date > date);
                prop_assert!(next.date <= date + Days::new(60));
                prop_assert!(is_date_available(next.date, Some(&schedule)));
                let mut d = date + Days::new(1);
                while d < next.date {
                    prop_assert!(!is_date_available(d, Some(&schedule)));
                    d = d + Days::new(1);
                }
            }
            None => prop_assert!(weekly.open_days().is_empty()),
        }
    }

    #[test]
    fn time_slot_display_roundtrips_through_parse(minutes in 0u32..1440) {
        let slot = TimeSlot::from_minutes(minutes).unwrap();
        prop_assert_eq!(TimeSlot::parse(&slot.to_string()).unwrap(), slot);
    }
}
