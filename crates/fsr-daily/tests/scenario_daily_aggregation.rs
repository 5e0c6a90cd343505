//! Daily Aggregator: nozzle totals, cash, loss percent and per-pump values
//! for one shift.

use fsr_daily::*;
use fsr_schemas::{FuelType, MeterReading, NozzleReading};

fn nozzle(id: &str, electronic: (f64, f64), mechanical: (f64, f64)) -> NozzleReading {
    NozzleReading {
        nozzle_id: id.to_string(),
        attendant: "amina".to_string(),
        electronic: MeterReading::new(electronic.0, electronic.1),
        mechanical: MeterReading::new(mechanical.0, mechanical.1),
    }
}

fn shift_nozzles() -> Vec<NozzleReading> {
    vec![
        nozzle("P1-A", (10_000.0, 10_600.0), (20_000.0, 20_602.0)),
        nozzle("P1-B", (5_000.0, 5_400.0), (7_000.0, 7_398.0)),
        nozzle("P2-A", (1_000.0, 1_739.855), (3_000.0, 3_740.0)),
    ]
}

#[test]
fn totals_sum_each_meter_source_separately() {
    let t = nozzle_totals(&shift_nozzles());
    assert_eq!(t.electronic_l, 1_739.86);
    assert_eq!(t.mechanical_l, 1_740.0);
}

#[test]
fn expected_cash_and_difference_follow_electronic_total() {
    let f = financials(1_000.0, 650.0, Some(648_000.0));
    assert_eq!(f.expected_cash, 650_000.0);
    assert_eq!(f.cash_difference, Some(-2_000.0));

    let f = financials(1_000.0, 650.0, None);
    assert_eq!(f.cash_difference, None);
}

#[test]
fn loss_percent_guards_zero_movement() {
    assert_eq!(loss_percent(1_739.855, 1_769.57), -1.68);
    assert_eq!(loss_percent(25.0, 0.0), 0.0);
}

#[test]
fn pumps_group_by_prefix_and_average_both_meters() {
    let pumps = pump_averages(&shift_nozzles(), 2.0);
    assert_eq!(pumps.len(), 2);

    assert_eq!(pumps[0].pump_id, "P1");
    assert_eq!(pumps[0].nozzle_count, 2);
    // (600 + 602)/2 + (400 + 398)/2 = 601 + 399
    assert_eq!(pumps[0].average_volume_l, 1_000.0);
    assert_eq!(pumps[0].value, 2_000.0);

    assert_eq!(pumps[1].pump_id, "P2");
    assert_eq!(pumps[1].nozzle_count, 1);
}

#[test]
fn aggregate_without_allocations_or_history() {
    let nozzles = shift_nozzles();
    let s = aggregate(&DailyInput {
        fuel_type: FuelType::Petrol,
        nozzles: &nozzles,
        tank_movement_l: 1_769.57,
        price_per_l: 650.0,
        actual_cash: None,
        allocations: &[],
        previous: None,
    })
    .unwrap();

    assert_eq!(s.electronic_vs_tank_l, -29.71);
    assert_eq!(s.cumulative.shift_count, 1);
    assert_eq!(s.cumulative.tank_movement_l, 1_769.57);
    assert!(s.allocation.is_none());

    let v = serde_json::to_value(&s).unwrap();
    assert!(v.get("allocation").is_none());
}
