//! Wall-clock time-of-day values.
//!
//! A [`TimeSlot`] is the start of a fixed-width bookable interval, stored as
//! minutes since midnight and rendered as zero-padded 24-hour `HH:MM`. Because
//! rendering is zero-padded, lexicographic order of the strings equals the
//! numeric order of the values.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

/// Minutes in a day; every valid [`TimeSlot`] is strictly below this.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u32);

impl TimeSlot {
    /// Build a slot from hour and minute. Returns `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Build a slot from minutes since midnight. Returns `None` at or past midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Advance by `minutes`, carrying into the hour. Returns `None` instead of
    /// wrapping past midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }

    /// Absolute distance in minutes between two times on the same day.
    pub fn distance(self, other: TimeSlot) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// Parse `H:MM`, `HH:MM` or `HH:MM:SS` (seconds are dropped).
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self::from)
            .map_err(|e| EngineError::InvalidTime(format!("'{}': {}", s, e)))
    }
}

impl From<NaiveTime> for TimeSlot {
    fn from(t: NaiveTime) -> Self {
        Self(t.hour() * 60 + t.minute())
    }
}

impl From<TimeSlot> for NaiveTime {
    fn from(slot: TimeSlot) -> Self {
        // Always in range: TimeSlot values are < MINUTES_PER_DAY.
        NaiveTime::from_hms_opt(slot.hour(), slot.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A start/end pair of wall-clock times, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeSlot,
    pub end: TimeSlot,
}

impl TimeRange {
    /// True when the range contains at least one minute.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}
