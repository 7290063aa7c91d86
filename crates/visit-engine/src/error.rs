//! Error types for visit-engine boundary operations.
//!
//! The scheduling operations themselves never fail; these errors come from
//! parsing caller-supplied values, decoding doctor records, invalid rules, and
//! illegal booking-session transitions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid schedule JSON: {0}")]
    ScheduleParse(#[from] serde_json::Error),

    #[error("Invalid scheduling rules: {0}")]
    InvalidRules(String),

    #[error("Booking session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
