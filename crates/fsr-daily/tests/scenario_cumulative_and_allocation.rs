//! Running totals chain across periods; diesel customer allocation balances
//! against the electronic total.

use fsr_daily::*;
use fsr_schemas::{CustomerAllocation, FuelType, MeterReading, NozzleReading};

fn one_nozzle(sold: f64) -> Vec<NozzleReading> {
    vec![NozzleReading {
        nozzle_id: "P3-A".to_string(),
        attendant: "kofi".to_string(),
        electronic: MeterReading::new(0.0, sold),
        mechanical: MeterReading::new(0.0, sold),
    }]
}

fn alloc(customer: &str, volume_l: f64, price: Option<f64>) -> CustomerAllocation {
    CustomerAllocation {
        customer: customer.to_string(),
        volume_l,
        price_per_l: price,
    }
}

#[test]
fn cumulative_totals_chain_over_three_shifts() {
    let mut previous: Option<CumulativeTotals> = None;
    for (sold, movement) in [(990.0, 1_000.0), (1_990.0, 2_000.0), (1_000.0, 1_000.0)] {
        let nozzles = one_nozzle(sold);
        let s = aggregate(&DailyInput {
            fuel_type: FuelType::Petrol,
            nozzles: &nozzles,
            tank_movement_l: movement,
            price_per_l: 1.0,
            actual_cash: None,
            allocations: &[],
            previous: previous.as_ref(),
        })
        .unwrap();
        previous = Some(s.cumulative);
    }

    let c = previous.unwrap();
    assert_eq!(c.shift_count, 3);
    assert_eq!(c.volume_sold_l, 3_980.0);
    assert_eq!(c.variance_l, -20.0);
    assert_eq!(c.tank_movement_l, 4_000.0);
    assert_eq!(c.loss_percent, -0.5);
}

#[test]
fn diesel_allocation_balances_within_half_a_liter() {
    let r = allocate(
        FuelType::Diesel,
        1_000.0,
        700.0,
        &[alloc("Haulage Ltd", 600.0, Some(680.0)), alloc("Farm Co", 399.6, None)],
    )
    .unwrap();

    assert_eq!(r.allocated_l, 999.6);
    assert_eq!(r.balance_l, 0.4);
    assert!(r.balanced);
    assert_eq!(r.customers[0].revenue, 408_000.0);
    assert_eq!(r.customers[1].price_per_l, 700.0);
    assert_eq!(r.customers[1].revenue, 279_720.0);
    assert_eq!(r.total_revenue, 687_720.0);
}

#[test]
fn over_allocation_is_reported_with_negative_balance() {
    let r = allocate(FuelType::Diesel, 1_000.0, 700.0, &[alloc("Haulage Ltd", 1_002.0, None)]).unwrap();
    assert_eq!(r.balance_l, -2.0);
    assert!(!r.balanced);
}

#[test]
fn non_diesel_allocations_are_rejected() {
    let err = allocate(FuelType::Petrol, 1_000.0, 650.0, &[alloc("Taxi Co", 10.0, None)]).unwrap_err();
    assert_eq!(err, AllocationError::NotDiesel(FuelType::Petrol));
    assert!(err.to_string().contains("DIESEL"));
}

#[test]
fn invalid_allocation_entries_are_rejected() {
    let err = allocate(FuelType::Diesel, 1_000.0, 700.0, &[alloc("Farm Co", -1.0, None)]).unwrap_err();
    assert!(matches!(err, AllocationError::InvalidVolume { .. }));

    let err = allocate(FuelType::Diesel, 1_000.0, 700.0, &[alloc("Farm Co", 1.0, Some(0.0))]).unwrap_err();
    assert!(matches!(err, AllocationError::InvalidPrice { .. }));

    let err = allocate(FuelType::Diesel, 1_000.0, 700.0, &[alloc("  ", 1.0, None)]).unwrap_err();
    assert_eq!(err, AllocationError::EmptyCustomer);
}

#[test]
fn aggregate_surfaces_allocation_errors() {
    let nozzles = one_nozzle(100.0);
    let allocations = [alloc("Taxi Co", 100.0, None)];
    let err = aggregate(&DailyInput {
        fuel_type: FuelType::Kerosene,
        nozzles: &nozzles,
        tank_movement_l: 100.0,
        price_per_l: 500.0,
        actual_cash: None,
        allocations: &allocations,
        previous: None,
    })
    .unwrap_err();
    assert_eq!(err, AllocationError::NotDiesel(FuelType::Kerosene));
}
