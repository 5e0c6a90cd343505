use crate::{Breakpoint, CalibrationError, DipCheck, Tank};

fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Dip height (cm) -> volume (L).
///
/// - dip <= 0 (or NaN) => 0
/// - exact breakpoint => chart value
/// - between breakpoints => linear interpolation
/// - beyond the last breakpoint => tank capacity
pub fn dip_to_volume(tank: &Tank, dip_cm: f64) -> f64 {
    if dip_cm.is_nan() || dip_cm <= 0.0 {
        return 0.0;
    }
    let pts: &[Breakpoint] = tank.chart.points();
    if dip_cm > tank.chart.max_dip_cm() {
        return tank.capacity_l;
    }

    // First breakpoint with dip >= dip_cm. pts[0] is (0, 0) and dip_cm > 0, so idx >= 1.
    let idx = pts.partition_point(|p| p.dip_cm < dip_cm);
    let hi = pts[idx];
    if hi.dip_cm == dip_cm {
        return hi.volume_l;
    }
    let lo = pts[idx - 1];
    lerp(dip_cm, lo.dip_cm, hi.dip_cm, lo.volume_l, hi.volume_l)
}

/// Volume (L) -> dip height (cm). Inverse of [`dip_to_volume`] on the chart.
///
/// Clamps to 0 for volume <= 0 and to the maximum chart dip at or above the
/// last breakpoint volume.
pub fn volume_to_dip(tank: &Tank, volume_l: f64) -> f64 {
    if volume_l.is_nan() || volume_l <= 0.0 {
        return 0.0;
    }
    let pts = tank.chart.points();
    if volume_l >= tank.chart.max_volume_l() {
        return tank.chart.max_dip_cm();
    }

    let idx = pts.partition_point(|p| p.volume_l < volume_l);
    let hi = pts[idx];
    if hi.volume_l == volume_l {
        return hi.dip_cm;
    }
    let lo = pts[idx - 1];
    lerp(volume_l, lo.volume_l, hi.volume_l, lo.dip_cm, hi.dip_cm)
}

/// Check a submitted dip against the chart.
///
/// Fails with `RangeError` for negative, non-finite or above-chart dips.
/// A dip below `low_fuel_percent` of the maximum chart dip passes with a
/// low-fuel advisory.
pub fn validate_dip(
    tank: &Tank,
    dip_cm: f64,
    low_fuel_percent: f64,
) -> Result<DipCheck, CalibrationError> {
    let max_dip_cm = tank.chart.max_dip_cm();
    if !dip_cm.is_finite() || dip_cm < 0.0 || dip_cm > max_dip_cm {
        return Err(CalibrationError::Range {
            tank_id: tank.id.clone(),
            dip_cm,
            max_dip_cm,
        });
    }

    let volume_l = dip_to_volume(tank, dip_cm);
    let low_fuel_floor = max_dip_cm * low_fuel_percent / 100.0;
    let low_fuel = dip_cm < low_fuel_floor;
    let advisory = low_fuel.then(|| {
        format!(
            "LOW_FUEL: tank {} dip {:.1} cm is below {:.0}% of chart maximum ({:.1} cm); {:.0} L remaining",
            tank.id, dip_cm, low_fuel_percent, max_dip_cm, volume_l
        )
    });

    Ok(DipCheck {
        dip_cm,
        volume_l,
        low_fuel,
        advisory,
    })
}
