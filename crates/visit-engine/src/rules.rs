//! Scheduling rules: slot width, matching tolerance, and search horizon.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 30;
pub const DEFAULT_HORIZON_DAYS: u32 = 60;

/// Tunable constants shared by every operation.
///
/// Deserializes from JSON with any field omitted falling back to its default:
///
/// ```rust
/// use visit_engine::SchedulingRules;
///
/// let rules = SchedulingRules::from_json(r#"{"horizon_days": 14}"#).unwrap();
/// assert_eq!(rules.horizon_days, 14);
/// assert_eq!(rules.slot_minutes, 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRules {
    /// Width of one bookable slot.
    pub slot_minutes: u32,
    /// A proposed time matches a slot when closer than this (or exactly on it).
    pub tolerance_minutes: u32,
    /// Number of days after today scanned for the next open day.
    pub horizon_days: u32,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl SchedulingRules {
    /// Parse and validate rules from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject values that would make slot expansion or the forward scan degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 {
            return Err(EngineError::InvalidRules(
                "slot_minutes must be greater than zero".to_string(),
            ));
        }
        if self.slot_minutes >= crate::clock::MINUTES_PER_DAY {
            return Err(EngineError::InvalidRules(format!(
                "slot_minutes must be less than a day, got {}",
                self.slot_minutes
            )));
        }
        if self.horizon_days == 0 {
            return Err(EngineError::InvalidRules(
                "horizon_days must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
