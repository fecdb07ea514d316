use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use crate::models::laytime::{ExclusionWindow, LaytimeError, LaytimeRequest, LaytimeStatus};
use crate::services::laytime::evaluate_laytime;

fn request(
    arrival: &str,
    completion: &str,
    allowed_days: f64,
    exclusions: &[(&str, &str)],
) -> LaytimeRequest {
    LaytimeRequest {
        arrival: arrival.to_string(),
        completion: completion.to_string(),
        allowed_days,
        exclusions: exclusions
            .iter()
            .map(|(start, end)| ExclusionWindow::new(*start, *end))
            .collect(),
    }
}

/// Timestamp `minutes` minutes after 2025-08-10 08:00.
fn ts(minutes: i64) -> String {
    let base = NaiveDate::from_ymd_opt(2025, 8, 10)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    (base + Duration::minutes(minutes))
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[test]
fn test_two_days_exactly_on_time() {
    let result =
        evaluate_laytime(&request("2025-08-10 08:00", "2025-08-12 08:00", 2.0, &[])).unwrap();
    assert_eq!(result.gross_hours, 48.0);
    assert_eq!(result.excluded_hours, 0.0);
    assert_eq!(result.used_hours, 48.0);
    assert_eq!(result.allowed_hours, 48.0);
    assert_eq!(result.balance_hours, 0.0);
    assert_eq!(result.status, LaytimeStatus::OnTime);
}

#[test]
fn test_short_allowance_is_demurrage() {
    let result =
        evaluate_laytime(&request("2025-08-10 08:00", "2025-08-12 08:00", 1.5, &[])).unwrap();
    assert_eq!(result.allowed_hours, 36.0);
    assert_eq!(result.balance_hours, -12.0);
    assert_eq!(result.status, LaytimeStatus::Demurrage);
}

#[test]
fn test_inner_exclusion_earns_despatch() {
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        3.0,
        &[("2025-08-10 20:00", "2025-08-11 08:00")],
    ))
    .unwrap();
    assert_eq!(result.gross_hours, 48.0);
    assert_eq!(result.excluded_hours, 12.0);
    assert_eq!(result.used_hours, 36.0);
    assert_eq!(result.allowed_hours, 72.0);
    assert_eq!(result.balance_hours, 36.0);
    assert_eq!(result.status, LaytimeStatus::Despatch);
}

#[test]
fn test_exclusion_before_arrival_contributes_nothing() {
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        2.0,
        &[("2025-08-01 00:00", "2025-08-02 00:00")],
    ))
    .unwrap();
    assert_eq!(result.excluded_hours, 0.0);
    assert_eq!(result.used_hours, result.gross_hours);
}

#[test]
fn test_malformed_completion_is_rejected() {
    let err = evaluate_laytime(&request("2025-08-10 08:00", "2025/08/12 08:00", 2.0, &[]))
        .unwrap_err();
    match err {
        LaytimeError::InvalidTimeFormat { field, value } => {
            assert_eq!(field, "completion");
            assert_eq!(value, "2025/08/12 08:00");
        }
    }
}

#[test]
fn test_malformed_exclusion_fails_whole_call() {
    let err = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        2.0,
        &[
            ("2025-08-10 20:00", "2025-08-11 08:00"),
            ("2025-08-11 20:00", "not a time"),
        ],
    ))
    .unwrap_err();
    match err {
        LaytimeError::InvalidTimeFormat { field, .. } => {
            assert_eq!(field, "exclusions[1].end");
        }
    }
}

#[test]
fn test_inverted_exclusion_window_counts_zero() {
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        2.0,
        &[("2025-08-11 08:00", "2025-08-10 20:00")],
    ))
    .unwrap();
    assert_eq!(result.excluded_hours, 0.0);
}

#[test]
fn test_exclusion_clamped_to_reference_window() {
    // Window straddles the arrival: only the inside part counts.
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        2.0,
        &[("2025-08-09 20:00", "2025-08-10 14:00")],
    ))
    .unwrap();
    assert_eq!(result.excluded_hours, 6.0);
    assert_eq!(result.used_hours, 42.0);
}

#[test]
fn test_overlapping_exclusions_double_subtract() {
    // Two windows covering the same 6 hours subtract 12 hours. Preserved
    // behavior: exclusions are summed independently, never merged.
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-12 08:00",
        2.0,
        &[
            ("2025-08-10 20:00", "2025-08-11 02:00"),
            ("2025-08-10 20:00", "2025-08-11 02:00"),
        ],
    ))
    .unwrap();
    assert_eq!(result.excluded_hours, 12.0);
    assert_eq!(result.used_hours, 36.0);
}

#[test]
fn test_wide_exclusions_clamp_used_at_zero() {
    // Excluded hours may exceed gross hours; used time floors at zero.
    let result = evaluate_laytime(&request(
        "2025-08-10 08:00",
        "2025-08-11 08:00",
        1.0,
        &[
            ("2025-08-10 00:00", "2025-08-12 00:00"),
            ("2025-08-10 00:00", "2025-08-12 00:00"),
        ],
    ))
    .unwrap();
    assert_eq!(result.gross_hours, 24.0);
    assert_eq!(result.excluded_hours, 48.0);
    assert_eq!(result.used_hours, 0.0);
    assert_eq!(result.status, LaytimeStatus::Despatch);
}

#[test]
fn test_completion_before_arrival_keeps_signed_gross() {
    let result =
        evaluate_laytime(&request("2025-08-12 08:00", "2025-08-10 08:00", 1.0, &[])).unwrap();
    assert_eq!(result.gross_hours, -48.0);
    assert_eq!(result.used_hours, 0.0);
    assert_eq!(result.balance_hours, 24.0);
    assert_eq!(result.status, LaytimeStatus::Despatch);
}

#[test]
fn test_negative_allowed_days_forces_demurrage() {
    // Accepted, not rejected: the negative allowance propagates.
    let result =
        evaluate_laytime(&request("2025-08-10 08:00", "2025-08-10 08:00", -1.0, &[])).unwrap();
    assert_eq!(result.allowed_hours, -24.0);
    assert_eq!(result.balance_hours, -24.0);
    assert_eq!(result.status, LaytimeStatus::Demurrage);
}

#[test]
fn test_fractional_hours_round_to_two_decimals() {
    // 50 minutes = 0.8333... h, presented as 0.83.
    let result =
        evaluate_laytime(&request("2025-08-10 08:00", "2025-08-10 08:50", 0.0, &[])).unwrap();
    assert_eq!(result.gross_hours, 0.83);
    assert_eq!(result.used_hours, 0.83);
    assert_eq!(result.balance_hours, -0.83);
    assert_eq!(result.status, LaytimeStatus::Demurrage);
}

#[test]
fn test_zero_duration_zero_allowance_is_on_time() {
    let result =
        evaluate_laytime(&request("2025-08-10 08:00", "2025-08-10 08:00", 0.0, &[])).unwrap();
    assert_eq!(result.balance_hours, 0.0);
    assert_eq!(result.status, LaytimeStatus::OnTime);
}

proptest! {
    #[test]
    fn prop_used_hours_never_negative(
        completion_offset in -20_000i64..20_000,
        allowed in -50.0f64..50.0,
        ex_start in -20_000i64..20_000,
        ex_len in -10_000i64..10_000,
    ) {
        let result = evaluate_laytime(&LaytimeRequest {
            arrival: ts(0),
            completion: ts(completion_offset),
            allowed_days: allowed,
            exclusions: vec![ExclusionWindow::new(ts(ex_start), ts(ex_start + ex_len))],
        })
        .unwrap();
        prop_assert!(result.used_hours >= 0.0);
        prop_assert!(result.excluded_hours >= 0.0);
    }

    #[test]
    fn prop_no_exclusions_used_equals_gross(completion_offset in 0i64..20_000) {
        let result = evaluate_laytime(&LaytimeRequest {
            arrival: ts(0),
            completion: ts(completion_offset),
            allowed_days: 2.0,
            exclusions: vec![],
        })
        .unwrap();
        prop_assert_eq!(result.excluded_hours, 0.0);
        prop_assert_eq!(result.used_hours, result.gross_hours);
    }

    #[test]
    fn prop_outputs_rounded_to_two_decimals(
        completion_offset in -20_000i64..20_000,
        allowed in -50.0f64..50.0,
        ex_start in -20_000i64..20_000,
        ex_len in 0i64..10_000,
    ) {
        let result = evaluate_laytime(&LaytimeRequest {
            arrival: ts(0),
            completion: ts(completion_offset),
            allowed_days: allowed,
            exclusions: vec![ExclusionWindow::new(ts(ex_start), ts(ex_start + ex_len))],
        })
        .unwrap();
        for field in [
            result.gross_hours,
            result.excluded_hours,
            result.used_hours,
            result.allowed_hours,
            result.balance_hours,
        ] {
            prop_assert!((field * 100.0 - (field * 100.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_status_matches_balance_sign(
        completion_offset in -20_000i64..20_000,
        allowed in -50.0f64..50.0,
    ) {
        let result = evaluate_laytime(&LaytimeRequest {
            arrival: ts(0),
            completion: ts(completion_offset),
            allowed_days: allowed,
            exclusions: vec![],
        })
        .unwrap();
        let expected = if result.balance_hours > 0.0 {
            LaytimeStatus::Despatch
        } else if result.balance_hours < 0.0 {
            LaytimeStatus::Demurrage
        } else {
            LaytimeStatus::OnTime
        };
        prop_assert_eq!(result.status, expected);
    }

    #[test]
    fn prop_fully_inside_exclusion_contributes_its_duration(
        ex_start in 0i64..5_000,
        ex_len in 0i64..5_000,
    ) {
        // Reference window is ten thousand minutes wide; the exclusion always
        // fits inside it.
        let result = evaluate_laytime(&LaytimeRequest {
            arrival: ts(0),
            completion: ts(10_000),
            allowed_days: 7.0,
            exclusions: vec![ExclusionWindow::new(ts(ex_start), ts(ex_start + ex_len))],
        })
        .unwrap();
        let expected = (ex_len as f64 / 60.0 * 100.0).round() / 100.0;
        prop_assert_eq!(result.excluded_hours, expected);
    }
}
