//! Three 5,000 L deliveries submitted out of chronological order.
//!
//! GREEN when:
//! - the validator re-sorts by timestamp and reports `reordered`
//! - no FAIL and no ordering-related warnings are produced
//! - the timeline attributes sales to each interval in time order

use chrono::NaiveDate;
use fsr_delivery::*;
use fsr_schemas::{Delivery, TankId, ThresholdConfig};

fn delivery(hour: u32, before: f64, after: f64) -> Delivery {
    Delivery {
        tank_id: TankId::new("T1"),
        delivered_at: NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
        volume_before_l: before,
        volume_after_l: after,
        supplier: "Depot A".to_string(),
        invoice_ref: None,
        expected_volume_l: Some(5_000.0),
        stated_volume_l: Some(5_000.0),
    }
}

fn window() -> TankWindow {
    TankWindow {
        tank_id: TankId::new("T1"),
        capacity_l: 40_000.0,
        opening_l: 8_050.0,
        closing_l: 17_000.0,
    }
}

fn shuffled() -> Vec<Delivery> {
    vec![
        delivery(15, 14_000.0, 19_000.0),
        delivery(8, 8_000.0, 13_000.0),
        delivery(11, 11_000.0, 16_000.0),
    ]
}

#[test]
fn validator_resorts_without_ordering_issues() {
    let report = validate_deliveries(&window(), &shuffled(), &ThresholdConfig::default());

    assert!(report.reordered);
    assert!(report.is_valid(), "issues: {:?}", report.issues);
    assert!(report.issues.is_empty(), "issues: {:?}", report.issues);

    let befores: Vec<f64> = report.deliveries.iter().map(|d| d.volume_before_l).collect();
    assert_eq!(befores, vec![8_000.0, 11_000.0, 14_000.0]);
    assert_eq!(report.total_delivered_l, 15_000.0);
}

#[test]
fn already_sorted_input_is_not_flagged_reordered() {
    let mut ds = shuffled();
    sort_chronologically(&mut ds);
    let report = validate_deliveries(&window(), &ds, &ThresholdConfig::default());
    assert!(!report.reordered);
}

#[test]
fn timeline_attributes_sales_per_interval_in_time_order() {
    let w = window();
    let tl = reconstruct_timeline(w.opening_l, w.closing_l, &shuffled()).unwrap();

    let sales: Vec<f64> = tl.sales_segments().map(|s| s.sales_l).collect();
    assert_eq!(sales, vec![50.0, 2_000.0, 2_000.0, 2_000.0]);
    assert_eq!(tl.total_delivered_l, 15_000.0);
    assert_eq!(tl.total_sales_l, 6_050.0);
    assert_eq!(tl.expected_movement_l, 6_050.0);
    assert!(tl.cross_check_ok);
    assert!(tl.warnings.is_empty());

    // sales, delivery, sales, delivery, sales, delivery, sales
    assert_eq!(tl.events.len(), 7);
    assert!(matches!(tl.events[1], TimelineEvent::Delivery(DeliveryEvent { index: 0, .. })));
    let first = tl.sales_segments().next().unwrap();
    assert_eq!(first.from, Boundary::ShiftOpen);
}
