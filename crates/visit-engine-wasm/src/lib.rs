//! WASM bindings for visit-engine.
//!
//! Exposes the availability and booking operations to the registration and
//! appointment forms via `wasm-bindgen`. Doctor schedules and results cross the
//! boundary as JSON strings; dates are `YYYY-MM-DD` and times `HH:MM`.
//!
//! Every export is a thin wrapper over a native function returning
//! `Result<_, String>`, so the JSON layer is testable off-wasm.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p visit-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/opd-frontend/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/visit_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use visit_engine::display::format_time_range;
use visit_engine::{
    BookingDecision, DoctorSchedule, NextAvailable, SchedulingRules, TimeSlot,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NextAvailableDto {
    date: String,
    slots: Vec<String>,
    /// Raw first-period bounds, `null` when no period is enabled.
    time_range: Option<TimeRangeDto>,
    /// Pre-rendered `9:00 AM - 11:00 AM`, for toasts.
    time_range_label: Option<String>,
}

#[derive(Serialize)]
struct TimeRangeDto {
    start: String,
    end: String,
}

impl From<&NextAvailable> for NextAvailableDto {
    fn from(next: &NextAvailable) -> Self {
        Self {
            date: next.date.to_string(),
            slots: next.slots.iter().map(TimeSlot::to_string).collect(),
            time_range: next.time_range.map(|r| TimeRangeDto {
                start: r.start.to_string(),
                end: r.end.to_string(),
            }),
            time_range_label: next.time_range.as_ref().map(format_time_range),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingDecisionDto {
    date: String,
    time: String,
    corrected: bool,
    rejected: bool,
    reason: Option<String>,
}

impl From<&BookingDecision> for BookingDecisionDto {
    fn from(d: &BookingDecision) -> Self {
        Self {
            date: d.date.to_string(),
            time: d.time.to_string(),
            corrected: d.corrected(),
            rejected: d.is_rejected(),
            reason: d.reason.as_ref().map(|r| r.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary values
// ---------------------------------------------------------------------------

/// An empty string or `null` means no doctor selected yet.
fn parse_schedule(json: &str) -> Result<Option<DoctorSchedule>, String> {
    let trimmed = json.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    DoctorSchedule::from_json(trimmed)
        .map(Some)
        .map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    visit_engine::parse_date(s).map_err(|e| e.to_string())
}

fn parse_time(s: &str) -> Result<TimeSlot, String> {
    TimeSlot::parse(s).map_err(|e| e.to_string())
}

/// Rules JSON with any field omitted falls back to the default. `None` or an
/// empty string means all defaults.
fn parse_rules(json: Option<&str>) -> Result<SchedulingRules, String> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => SchedulingRules::from_json(raw).map_err(|e| e.to_string()),
        None => Ok(SchedulingRules::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn render_slots(slots: &[TimeSlot]) -> Vec<String> {
    slots.iter().map(TimeSlot::to_string).collect()
}

// ---------------------------------------------------------------------------
// Native implementations
// ---------------------------------------------------------------------------

fn is_date_available_impl(schedule_json: &str, date: &str) -> Result<bool, String> {
    let schedule = parse_schedule(schedule_json)?;
    Ok(visit_engine::is_date_available(parse_date(date)?, schedule.as_ref()))
}

fn get_available_time_slots_impl(
    schedule_json: &str,
    date: &str,
    rules_json: Option<&str>,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let rules = parse_rules(rules_json)?;
    let slots =
        visit_engine::get_available_time_slots(schedule.as_ref(), parse_date(date)?, &rules);
    to_json(&render_slots(&slots))
}

fn is_time_available_impl(
    schedule_json: &str,
    date: &str,
    time: &str,
    rules_json: Option<&str>,
) -> Result<bool, String> {
    let schedule = parse_schedule(schedule_json)?;
    let rules = parse_rules(rules_json)?;
    Ok(visit_engine::is_time_available(
        parse_time(time)?,
        schedule.as_ref(),
        parse_date(date)?,
        &rules,
    ))
}

fn get_next_available_date_impl(
    schedule_json: &str,
    today: &str,
    rules_json: Option<&str>,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let rules = parse_rules(rules_json)?;
    let next = visit_engine::get_next_available_date(schedule.as_ref(), parse_date(today)?, &rules);
    to_json(&next.as_ref().map(NextAvailableDto::from))
}

fn validate_and_correct_impl(
    schedule_json: &str,
    date: &str,
    time: &str,
    today: &str,
    rules_json: Option<&str>,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let rules = parse_rules(rules_json)?;
    let decision = visit_engine::validate_and_correct(
        schedule.as_ref(),
        parse_date(date)?,
        parse_time(time)?,
        parse_date(today)?,
        &rules,
    );
    to_json(&BookingDecisionDto::from(&decision))
}

fn availability_calendar_impl(
    schedule_json: &str,
    from: &str,
    days: u32,
    rules_json: Option<&str>,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let rules = parse_rules(rules_json)?;
    let results =
        visit_engine::availability_calendar(schedule.as_ref(), parse_date(from)?, days, &rules);
    to_json(&results)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// True when the doctor sees patients on the weekday of `date`.
///
/// Pass an empty string or `"null"` as `schedule_json` when no doctor is
/// selected; every date is then available.
#[wasm_bindgen(js_name = "isDateAvailable")]
pub fn is_date_available(schedule_json: &str, date: &str) -> Result<bool, JsValue> {
    is_date_available_impl(schedule_json, date).map_err(js_err)
}

/// Bookable `HH:MM` slots for `date` as a JSON array; `[]` on closed days.
#[wasm_bindgen(js_name = "getAvailableTimeSlots")]
pub fn get_available_time_slots(
    schedule_json: &str,
    date: &str,
    rules_json: Option<String>,
) -> Result<String, JsValue> {
    get_available_time_slots_impl(schedule_json, date, rules_json.as_deref()).map_err(js_err)
}

/// True when `time` may be booked on `date`.
#[wasm_bindgen(js_name = "isTimeAvailable")]
pub fn is_time_available(
    schedule_json: &str,
    date: &str,
    time: &str,
    rules_json: Option<String>,
) -> Result<bool, JsValue> {
    is_time_available_impl(schedule_json, date, time, rules_json.as_deref()).map_err(js_err)
}

/// Next open day after `today` as JSON `{date, slots, timeRange, timeRangeLabel}`,
/// or `null` when none exists within the horizon.
#[wasm_bindgen(js_name = "getNextAvailableDate")]
pub fn get_next_available_date(
    schedule_json: &str,
    today: &str,
    rules_json: Option<String>,
) -> Result<String, JsValue> {
    get_next_available_date_impl(schedule_json, today, rules_json.as_deref()).map_err(js_err)
}

/// Accept, correct, or reject a proposed booking. Returns JSON
/// `{date, time, corrected, rejected, reason}`.
#[wasm_bindgen(js_name = "validateAndCorrect")]
pub fn validate_and_correct(
    schedule_json: &str,
    date: &str,
    time: &str,
    today: &str,
    rules_json: Option<String>,
) -> Result<String, JsValue> {
    validate_and_correct_impl(schedule_json, date, time, today, rules_json.as_deref())
        .map_err(js_err)
}

/// Per-day availability for `days` days from `from`, for date pickers.
#[wasm_bindgen(js_name = "availabilityCalendar")]
pub fn availability_calendar(
    schedule_json: &str,
    from: &str,
    days: u32,
    rules_json: Option<String>,
) -> Result<String, JsValue> {
    availability_calendar_impl(schedule_json, from, days, rules_json.as_deref()).map_err(js_err)
}
