//! Booking form session: the state a registration or appointment form walks
//! through while the user picks a doctor, a date, and a time.
//!
//! ```text
//! Idle -> DoctorSelected -> DateChosen -> {Valid | AutoCorrected | Rejected} -> Submitted
//! ```
//!
//! Every edit of the date or time re-runs [`validate_and_correct`], so the
//! displayed values always match the doctor's schedule. `Rejected` only blocks
//! that date/time pair; choosing another date or time leaves it. `Submitted`
//! is terminal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::{validate_and_correct, BookingDecision, BookingStatus};
use crate::clock::TimeSlot;
use crate::error::{EngineError, Result};
use crate::finder::get_next_available_date;
use crate::rules::SchedulingRules;
use crate::schedule::DoctorSchedule;
use crate::slots::{first_enabled_window, generate_slots};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    DoctorSelected,
    DateChosen,
    Valid,
    AutoCorrected,
    Rejected,
    Submitted,
}

impl From<BookingStatus> for SessionState {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Valid => SessionState::Valid,
            BookingStatus::AutoCorrected => SessionState::AutoCorrected,
            BookingStatus::Rejected => SessionState::Rejected,
        }
    }
}

/// The validated date and time handed to the persistence layer on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: TimeSlot,
}

#[derive(Debug, Clone)]
pub struct BookingSession {
    rules: SchedulingRules,
    today: NaiveDate,
    schedule: Option<DoctorSchedule>,
    date: Option<NaiveDate>,
    time: Option<TimeSlot>,
    decision: Option<BookingDecision>,
    state: SessionState,
}

impl BookingSession {
    pub fn new(today: NaiveDate, rules: SchedulingRules) -> Self {
        Self {
            rules,
            today,
            schedule: None,
            date: None,
            time: None,
            decision: None,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<TimeSlot> {
        self.time
    }

    /// Last validation outcome, if a date and time have been validated.
    pub fn decision(&self) -> Option<&BookingDecision> {
        self.decision.as_ref()
    }

    /// Select (or switch) the doctor and pre-fill the next open day with its
    /// first slot. Without an open day in the horizon the session waits in
    /// `DoctorSelected` for a manual date.
    pub fn select_doctor(&mut self, schedule: DoctorSchedule) -> Result<SessionState> {
        self.ensure_editable()?;
        self.schedule = Some(schedule);
        self.date = None;
        self.time = None;
        self.decision = None;
        self.state = SessionState::DoctorSelected;

        if let Some(next) = get_next_available_date(self.schedule.as_ref(), self.today, &self.rules) {
            self.date = Some(next.date);
            self.time = next.first_time();
            self.state = SessionState::DateChosen;
            self.revalidate();
        }
        Ok(self.state)
    }

    /// Change the date. A time is filled in from the day's first slot when none
    /// has been chosen yet.
    pub fn choose_date(&mut self, date: NaiveDate) -> Result<SessionState> {
        self.ensure_editable()?;
        if self.state == SessionState::Idle {
            return Err(EngineError::Session(
                "select a doctor before choosing a date".to_string(),
            ));
        }
        self.date = Some(date);
        self.decision = None;
        self.state = SessionState::DateChosen;
        if self.time.is_none() {
            self.time = self.default_time(date);
        }
        self.revalidate();
        Ok(self.state)
    }

    /// Change the time of the chosen date.
    pub fn choose_time(&mut self, time: TimeSlot) -> Result<SessionState> {
        self.ensure_editable()?;
        if self.date.is_none() {
            return Err(EngineError::Session(
                "choose a date before choosing a time".to_string(),
            ));
        }
        self.time = Some(time);
        self.decision = None;
        self.state = SessionState::DateChosen;
        self.revalidate();
        Ok(self.state)
    }

    /// Final gate before the booking is sent. Re-validates and succeeds only
    /// for a valid or auto-corrected proposal.
    pub fn submit(&mut self) -> Result<BookingRequest> {
        self.ensure_editable()?;
        self.revalidate();
        match (self.state, self.date, self.time) {
            (SessionState::Valid | SessionState::AutoCorrected, Some(date), Some(time)) => {
                self.state = SessionState::Submitted;
                Ok(BookingRequest { date, time })
            }
            (SessionState::Rejected, _, _) => Err(EngineError::Session(format!(
                "booking rejected: {}",
                self.decision
                    .as_ref()
                    .and_then(|d| d.reason.as_ref())
                    .map(|r| r.to_string())
                    .unwrap_or_default()
            ))),
            (state, _, _) => Err(EngineError::Session(format!(
                "cannot submit from state {:?}",
                state
            ))),
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.state == SessionState::Submitted {
            return Err(EngineError::Session("booking already submitted".to_string()));
        }
        Ok(())
    }

    fn default_time(&self, date: NaiveDate) -> Option<TimeSlot> {
        let schedule = self.schedule.as_ref()?;
        generate_slots(date, schedule, &self.rules)
            .first()
            .copied()
            .or_else(|| first_enabled_window(schedule).map(|r| r.start))
    }

    /// Validate the current pair and adopt any correction.
    fn revalidate(&mut self) {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return;
        };
        let decision =
            validate_and_correct(self.schedule.as_ref(), date, time, self.today, &self.rules);
        if decision.corrected() {
            self.date = Some(decision.date);
            self.time = Some(decision.time);
        }
        self.state = decision.status.into();
        self.decision = Some(decision);
    }
}
