//! validate_dip: RangeError outside the chart, low-fuel advisory inside it.

use fsr_calibration::*;
use fsr_schemas::{FuelType, TankId};

fn tank() -> Tank {
    Tank::new(
        TankId::new("T2"),
        FuelType::Diesel,
        20_000.0,
        vec![
            Breakpoint::new(20.0, 1_000.0),
            Breakpoint::new(100.0, 9_000.0),
            Breakpoint::new(200.0, 19_500.0),
        ],
    )
    .unwrap()
}

#[test]
fn negative_dip_is_range_error() {
    let err = validate_dip(&tank(), -0.1, 10.0).unwrap_err();
    assert!(matches!(err, CalibrationError::Range { max_dip_cm, .. } if max_dip_cm == 200.0));
    assert!(err.to_string().starts_with("RangeError"), "{err}");
}

#[test]
fn dip_above_chart_is_range_error() {
    assert!(matches!(
        validate_dip(&tank(), 200.5, 10.0),
        Err(CalibrationError::Range { .. })
    ));
}

#[test]
fn non_finite_dip_is_range_error() {
    assert!(validate_dip(&tank(), f64::NAN, 10.0).is_err());
    assert!(validate_dip(&tank(), f64::INFINITY, 10.0).is_err());
}

#[test]
fn chart_maximum_is_accepted() {
    let c = validate_dip(&tank(), 200.0, 10.0).unwrap();
    assert_eq!(c.volume_l, 19_500.0);
    assert!(!c.low_fuel);
    assert!(c.advisory.is_none());
}

#[test]
fn low_dip_passes_with_advisory() {
    // 10% of 200 cm = 20 cm.
    let c = validate_dip(&tank(), 15.0, 10.0).unwrap();
    assert!(c.low_fuel);
    assert!((c.volume_l - 750.0).abs() < 1e-9);
    let msg = c.advisory.unwrap();
    assert!(msg.starts_with("LOW_FUEL"), "{msg}");
}

#[test]
fn low_fuel_floor_follows_configured_percent() {
    assert!(!validate_dip(&tank(), 15.0, 5.0).unwrap().low_fuel);
    assert!(validate_dip(&tank(), 15.0, 10.0).unwrap().low_fuel);
}
