//! Delivery Validator: FAIL vs WARNING rules on a single shift.

use chrono::{NaiveDate, NaiveDateTime};
use fsr_delivery::*;
use fsr_schemas::{Delivery, TankId, ThresholdConfig};

fn ts(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(hour, 30, 0)
        .unwrap()
}

fn delivery(hour: u32, before: f64, after: f64) -> Delivery {
    Delivery {
        tank_id: TankId::new("T1"),
        delivered_at: ts(hour),
        volume_before_l: before,
        volume_after_l: after,
        supplier: "Depot A".to_string(),
        invoice_ref: Some("INV-1".to_string()),
        expected_volume_l: None,
        stated_volume_l: None,
    }
}

fn window(opening: f64, closing: f64) -> TankWindow {
    TankWindow {
        tank_id: TankId::new("T1"),
        capacity_l: 30_000.0,
        opening_l: opening,
        closing_l: closing,
    }
}

fn validate(w: &TankWindow, ds: &[Delivery]) -> DeliveryReport {
    validate_deliveries(w, ds, &ThresholdConfig::default())
}

#[test]
fn no_deliveries_is_clean() {
    let r = validate(&window(10_000.0, 9_000.0), &[]);
    assert!(r.is_valid());
    assert!(r.issues.is_empty());
    assert_eq!(r.total_delivered_l, 0.0);
}

#[test]
fn after_not_above_before_fails() {
    let r = validate(&window(10_000.0, 9_000.0), &[delivery(9, 10_000.0, 10_000.0)]);
    assert!(!r.is_valid());
    assert!(r.has_code(DeliveryIssueCode::NonPositiveDelivery));
}

#[test]
fn after_above_capacity_fails() {
    let r = validate(&window(10_000.0, 29_000.0), &[delivery(9, 10_000.0, 30_500.0)]);
    assert!(!r.is_valid());
    let f: Vec<_> = r.failures().map(|i| i.code).collect();
    assert_eq!(f, vec![DeliveryIssueCode::CapacityExceeded]);
}

#[test]
fn delivery_against_other_tank_fails() {
    let mut d = delivery(9, 10_000.0, 15_000.0);
    d.tank_id = TankId::new("T2");
    let r = validate(&window(10_000.0, 14_000.0), &[d]);
    assert!(r.has_code(DeliveryIssueCode::WrongTank));
    assert!(!r.is_valid());
}

#[test]
fn non_finite_volume_fails_and_skips_other_checks() {
    let r = validate(&window(10_000.0, 14_000.0), &[delivery(9, f64::NAN, 15_000.0)]);
    assert!(r.has_code(DeliveryIssueCode::InvalidVolume));
    assert!(!r.has_code(DeliveryIssueCode::NonPositiveDelivery));
}

#[test]
fn stated_volume_mismatch_is_warning_only() {
    let mut d = delivery(9, 10_000.0, 15_000.0);
    d.stated_volume_l = Some(5_000.5);
    let r = validate(&window(10_000.0, 14_000.0), &[d.clone()]);
    assert!(r.is_valid());
    assert!(r.has_code(DeliveryIssueCode::StatedVolumeMismatch));

    // Within 0.1 L is agreement.
    d.stated_volume_l = Some(5_000.05);
    let r = validate(&window(10_000.0, 14_000.0), &[d]);
    assert!(!r.has_code(DeliveryIssueCode::StatedVolumeMismatch));
}

#[test]
fn short_delivery_against_invoice_is_warning() {
    let mut d = delivery(9, 10_000.0, 14_900.0);
    d.expected_volume_l = Some(5_000.0);
    let r = validate(&window(10_000.0, 14_000.0), &[d]);
    assert!(r.is_valid());
    let w = r
        .warnings()
        .find(|i| i.code == DeliveryIssueCode::InvoiceVolumeMismatch)
        .unwrap();
    assert!(w.message.contains("short"), "{}", w.message);
    assert_eq!(w.index, Some(0));
}

#[test]
fn large_delivery_relative_to_capacity_is_warning() {
    let r = validate(&window(1_000.0, 25_000.0), &[delivery(9, 1_000.0, 26_000.0)]);
    assert!(r.is_valid());
    assert!(r.has_code(DeliveryIssueCode::LargeDelivery));
}

#[test]
fn level_jump_between_deliveries_beyond_slack_is_warning() {
    let ds = [delivery(8, 10_000.0, 15_000.0), delivery(12, 15_250.0, 20_000.0)];
    let r = validate(&window(10_000.0, 19_000.0), &ds);
    assert!(r.is_valid());
    let gap = r
        .issues
        .iter()
        .find(|i| i.code == DeliveryIssueCode::SequenceGap)
        .unwrap();
    assert_eq!(gap.index, Some(1));

    // Within 100 L slack: no warning.
    let ds = [delivery(8, 10_000.0, 15_000.0), delivery(12, 15_080.0, 20_000.0)];
    let r = validate(&window(10_000.0, 19_000.0), &ds);
    assert!(!r.has_code(DeliveryIssueCode::SequenceGap));
}

#[test]
fn shift_boundary_divergence_is_warning_never_failure() {
    // Opening 600 L away from the first before-volume; closing above the last after-volume.
    let r = validate(&window(10_600.0, 15_200.0), &[delivery(9, 10_000.0, 15_000.0)]);
    assert!(r.is_valid());
    assert!(r.has_code(DeliveryIssueCode::OpeningMismatch));
    assert!(r.has_code(DeliveryIssueCode::ClosingMismatch));
    assert!(r.issues.iter().all(|i| i.severity == Severity::Warning));
}

#[test]
fn issues_are_reported_in_stable_order() {
    let mut d0 = delivery(8, 5_000.0, 31_000.0);
    d0.stated_volume_l = Some(1.0);
    let r = validate(&window(12_000.0, 32_000.0), &[d0]);
    let codes: Vec<_> = r.issues.iter().map(|i| i.code).collect();
    assert_eq!(
        codes,
        vec![
            DeliveryIssueCode::CapacityExceeded,
            DeliveryIssueCode::StatedVolumeMismatch,
            DeliveryIssueCode::LargeDelivery,
            DeliveryIssueCode::OpeningMismatch,
            DeliveryIssueCode::ClosingMismatch,
        ]
    );
}
