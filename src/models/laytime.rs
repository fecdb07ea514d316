use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for laytime evaluation.
pub type LaytimeCalcResult<T> = Result<T, LaytimeError>;

/// Errors that can occur while evaluating a laytime request.
///
/// Timestamp parsing is the only validation the engine performs. Everything
/// else (negative allowed days, inverted exclusion windows, completion before
/// arrival) is accepted and produces mathematically consistent output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaytimeError {
    /// A timestamp failed to parse against the required pattern. Fatal to the
    /// whole call; retrying a malformed string cannot succeed.
    #[error("Invalid time format in {field}: use 'YYYY-MM-DD HH:MM' (got '{value}')")]
    InvalidTimeFormat { field: String, value: String },
}

/// An interval excluded from laytime (weather delay, strike, ...).
///
/// Timestamps are raw caller-supplied strings; parsing happens inside the
/// evaluator so the error can name the offending field. Order within the pair
/// is not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionWindow {
    pub start: String,
    pub end: String,
}

impl ExclusionWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Input for one laytime evaluation. Constructed fresh per call, consumed
/// once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaytimeRequest {
    /// Vessel arrival, `YYYY-MM-DD HH:MM`.
    pub arrival: String,
    /// Completion of cargo operations, `YYYY-MM-DD HH:MM`.
    pub completion: String,
    /// Allowed time in days per the charter party. Sign is not validated.
    pub allowed_days: f64,
    /// Zero or more exclusion windows, in caller order.
    #[serde(default)]
    pub exclusions: Vec<ExclusionWindow>,
}

/// Demurrage/despatch verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaytimeStatus {
    /// Operations finished within laytime (balance > 0).
    Despatch,
    /// Laytime exceeded (balance < 0).
    Demurrage,
    /// Balance is exactly zero.
    OnTime,
}

impl fmt::Display for LaytimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LaytimeStatus::Despatch => "despatch",
            LaytimeStatus::Demurrage => "demurrage",
            LaytimeStatus::OnTime => "on_time",
        };
        f.write_str(s)
    }
}

/// Structured laytime verdict.
///
/// All hour fields are rounded to 2 decimal places for presentation; the
/// evaluator accumulates at full precision and rounds once, at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaytimeResult {
    pub gross_hours: f64,
    pub excluded_hours: f64,
    pub used_hours: f64,
    pub allowed_hours: f64,
    pub balance_hours: f64,
    pub status: LaytimeStatus,
}
