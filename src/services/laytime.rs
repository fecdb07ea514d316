//! Laytime evaluation.
//!
//! Converts vessel arrival/completion timestamps, an allowed duration and a
//! set of exclusion windows into a demurrage/despatch verdict. This is a pure,
//! stateless computation: it either returns a complete [`LaytimeResult`] or
//! fails atomically with one [`LaytimeError`].
//!
//! This is the simplified overlap-based exclusion model: exclusion windows are
//! clipped against the [arrival, completion] interval and their overlap hours
//! subtracted from the gross duration. There is no SHEX/SHINC calendar logic
//! and no notice-of-readiness timing.

use crate::models::laytime::{LaytimeCalcResult, LaytimeError, LaytimeRequest, LaytimeResult, LaytimeStatus};
use crate::models::time::{PortTime, TimeWindow};

/// Round to 2 decimal places for presentation.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_field(field: &str, value: &str) -> LaytimeCalcResult<PortTime> {
    PortTime::parse(value).map_err(|_| LaytimeError::InvalidTimeFormat {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Evaluate a laytime request.
///
/// Parsing is the trust boundary: any unparseable timestamp anywhere in the
/// request (arrival, completion or an exclusion bound) aborts the whole call,
/// naming the offending field. Out-of-range numeric inputs are accepted:
/// a negative `allowed_days` propagates into a negative allowance, completion
/// before arrival yields a negative gross duration, and inverted exclusion
/// windows simply contribute zero. `used_hours` is clamped at zero.
pub fn evaluate_laytime(request: &LaytimeRequest) -> LaytimeCalcResult<LaytimeResult> {
    let arrival = parse_field("arrival", &request.arrival)?;
    let completion = parse_field("completion", &request.completion)?;
    let reference = TimeWindow::new(arrival, completion);

    // Parse every exclusion up front: one bad timestamp fails the whole call
    // before any arithmetic happens.
    let mut exclusions = Vec::with_capacity(request.exclusions.len());
    for (i, window) in request.exclusions.iter().enumerate() {
        let start = parse_field(&format!("exclusions[{i}].start"), &window.start)?;
        let end = parse_field(&format!("exclusions[{i}].end"), &window.end)?;
        exclusions.push(TimeWindow::new(start, end));
    }

    let gross_hours = reference.duration_hours();

    // Exclusion windows are summed independently, clipped per window against
    // the reference interval. Mutually overlapping exclusions double-subtract;
    // the total is not capped relative to the gross duration.
    let excluded_hours: f64 = exclusions
        .iter()
        .map(|window| reference.overlap_hours(window))
        .sum();

    let used_hours = (gross_hours - excluded_hours).max(0.0);
    let allowed_hours = request.allowed_days * 24.0;

    // Round once, here. Status is classified on the rounded balance so the
    // verdict always agrees with the presented numbers.
    let balance_hours = round2(allowed_hours - used_hours);
    let status = if balance_hours > 0.0 {
        LaytimeStatus::Despatch
    } else if balance_hours < 0.0 {
        LaytimeStatus::Demurrage
    } else {
        LaytimeStatus::OnTime
    };

    Ok(LaytimeResult {
        gross_hours: round2(gross_hours),
        excluded_hours: round2(excluded_hours),
        used_hours: round2(used_hours),
        allowed_hours: round2(allowed_hours),
        balance_hours,
        status,
    })
}
