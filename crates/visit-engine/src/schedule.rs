//! The doctor schedule consumed by every engine operation.
//!
//! A [`DoctorSchedule`] is a read-only snapshot of two parts of a doctor record:
//! the weekly on/off map and the three named visiting periods. The engine never
//! mutates it; callers re-fetch when the doctor profile changes.
//!
//! Defaults for the weekly map are resolved once, at deserialization: a weekday
//! that is absent or `null` on the wire is open, and only an explicit `false`
//! closes it. Records created before the weekly schedule existed therefore stay
//! bookable every day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::{TimeRange, TimeSlot};
use crate::error::{EngineError, Result};

/// Day of the week, named the way doctor records name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Gregorian weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_chrono(date.weekday())
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    /// Lowercase key used in `weeklySchedule`.
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

impl FromStr for Weekday {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.key() == lower)
            .ok_or_else(|| EngineError::InvalidWeekday(s.to_string()))
    }
}

/// Wire form of the weekly map: every entry optional.
#[derive(Debug, Default, Deserialize)]
struct RawWeeklySchedule {
    #[serde(default, deserialize_with = "open_unless_false")]
    monday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    tuesday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    wednesday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    thursday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    friday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    saturday: Option<bool>,
    #[serde(default, deserialize_with = "open_unless_false")]
    sunday: Option<bool>,
}

/// Any value other than a JSON `false`, including strings like `"false"`,
/// leaves the day open.
fn open_unless_false<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(!matches!(value, serde_json::Value::Bool(false))))
}

/// Resolved weekly on/off map. Serializes as the full seven-key object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWeeklySchedule")]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl From<RawWeeklySchedule> for WeeklySchedule {
    fn from(raw: RawWeeklySchedule) -> Self {
        // Absent means open; only an explicit `false` closes a day.
        Self {
            monday: raw.monday.unwrap_or(true),
            tuesday: raw.tuesday.unwrap_or(true),
            wednesday: raw.wednesday.unwrap_or(true),
            thursday: raw.thursday.unwrap_or(true),
            friday: raw.friday.unwrap_or(true),
            saturday: raw.saturday.unwrap_or(true),
            sunday: raw.sunday.unwrap_or(true),
        }
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::from(RawWeeklySchedule::default())
    }
}

impl WeeklySchedule {
    /// Every day open.
    pub fn all_open() -> Self {
        Self::default()
    }

    /// Open every day except the listed ones.
    pub fn closed_on(days: &[Weekday]) -> Self {
        let mut schedule = Self::all_open();
        for day in days {
            schedule.set(*day, false);
        }
        schedule
    }

    pub fn is_open(&self, day: Weekday) -> bool {
        self.as_array()[day.index()]
    }

    pub fn set(&mut self, day: Weekday, open: bool) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = open;
    }

    /// Open days in Monday-first order.
    pub fn open_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|d| self.is_open(*d))
            .collect()
    }

    fn as_array(&self) -> [bool; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }
}

/// The three named visiting periods of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodName {
    Morning,
    Afternoon,
    Evening,
}

impl PeriodName {
    pub const ALL: [PeriodName; 3] = [PeriodName::Morning, PeriodName::Afternoon, PeriodName::Evening];
}

impl fmt::Display for PeriodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PeriodName::Morning => "morning",
            PeriodName::Afternoon => "afternoon",
            PeriodName::Evening => "evening",
        })
    }
}

/// One visiting period. Bounds stay as raw strings so a malformed value only
/// disables this period instead of failing the whole doctor record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitingPeriod {
    #[serde(default, deserialize_with = "only_true")]
    pub enabled: bool,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<String>,
}

/// Only a JSON `true` enables a period.
fn only_true<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_json::Value::Bool(true)))
}

/// A bound that is not a JSON string is treated as missing.
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl VisitingPeriod {
    /// An enabled period with the given `HH:MM` bounds.
    pub fn open(start: &str, end: &str) -> Self {
        Self {
            enabled: true,
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Parsed bounds of an enabled period. `None` when disabled or when either
    /// bound is missing or unparseable. Inverted bounds are returned as-is.
    pub fn bounds(&self) -> Option<TimeRange> {
        if !self.enabled {
            return None;
        }
        let start = TimeSlot::parse(self.start.as_deref()?).ok()?;
        let end = TimeSlot::parse(self.end.as_deref()?).ok()?;
        Some(TimeRange { start, end })
    }
}

/// Visiting hours: any subset of the three periods may be present and enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitingHours {
    #[serde(
        default,
        deserialize_with = "period_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub morning: Option<VisitingPeriod>,
    #[serde(
        default,
        deserialize_with = "period_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub afternoon: Option<VisitingPeriod>,
    #[serde(
        default,
        deserialize_with = "period_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub evening: Option<VisitingPeriod>,
}

/// A period that is not a JSON object is treated as absent.
fn period_or_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<VisitingPeriod>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl VisitingHours {
    pub fn period(&self, name: PeriodName) -> Option<&VisitingPeriod> {
        match name {
            PeriodName::Morning => self.morning.as_ref(),
            PeriodName::Afternoon => self.afternoon.as_ref(),
            PeriodName::Evening => self.evening.as_ref(),
        }
    }

    /// Present periods in morning, afternoon, evening order.
    pub fn periods(&self) -> impl Iterator<Item = (PeriodName, &VisitingPeriod)> {
        PeriodName::ALL
            .into_iter()
            .filter_map(move |name| self.period(name).map(|p| (name, p)))
    }

    /// True when at least one period is enabled.
    pub fn any_enabled(&self) -> bool {
        self.periods().any(|(_, p)| p.enabled)
    }
}

/// A doctor's weekly schedule and visiting hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSchedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_schedule: WeeklySchedule,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visiting_hours: VisitingHours,
}

/// Older records carry `null`, or a value of the wrong shape, for sections
/// they never filled in properly. Either decodes as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl DoctorSchedule {
    /// Decode a schedule from the doctor-record JSON shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_weekly(mut self, weekly: WeeklySchedule) -> Self {
        self.weekly_schedule = weekly;
        self
    }

    pub fn with_period(mut self, name: PeriodName, period: VisitingPeriod) -> Self {
        let slot = match name {
            PeriodName::Morning => &mut self.visiting_hours.morning,
            PeriodName::Afternoon => &mut self.visiting_hours.afternoon,
            PeriodName::Evening => &mut self.visiting_hours.evening,
        };
        *slot = Some(period);
        self
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}
