//! Properties over the whole chart range:
//! - dip_to_volume is monotonically non-decreasing
//! - volume_to_dip(dip_to_volume(d)) == d within interpolation tolerance

use fsr_calibration::*;
use fsr_schemas::{FuelType, TankId};
use proptest::prelude::*;

fn horizontal_cylinder() -> Tank {
    // Steep in the middle, flat at the ends, like a horizontal cylinder.
    Tank::new(
        TankId::new("HC1"),
        FuelType::Petrol,
        45_000.0,
        vec![
            Breakpoint::new(5.0, 180.0),
            Breakpoint::new(25.0, 2_300.0),
            Breakpoint::new(60.0, 8_900.0),
            Breakpoint::new(120.0, 22_000.0),
            Breakpoint::new(180.0, 35_100.0),
            Breakpoint::new(215.0, 41_700.0),
            Breakpoint::new(235.0, 43_800.0),
            Breakpoint::new(240.0, 44_000.0),
        ],
    )
    .unwrap()
}

proptest! {
    #[test]
    fn volume_is_monotone_in_dip(a in 0.0f64..240.0, b in 0.0f64..240.0) {
        let t = horizontal_cylinder();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(dip_to_volume(&t, lo) <= dip_to_volume(&t, hi) + 1e-9);
    }

    #[test]
    fn volume_to_dip_round_trips(d in 0.0f64..=240.0) {
        let t = horizontal_cylinder();
        let back = volume_to_dip(&t, dip_to_volume(&t, d));
        prop_assert!((back - d).abs() < 1e-6, "d={} back={}", d, back);
    }

    #[test]
    fn in_range_volume_never_exceeds_chart(d in 0.0f64..=240.0) {
        let t = horizontal_cylinder();
        let v = dip_to_volume(&t, d);
        prop_assert!(v >= 0.0 && v <= t.chart.max_volume_l());
    }
}
