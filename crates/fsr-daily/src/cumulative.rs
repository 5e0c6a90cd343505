//! Running totals across successive shifts of one tank.

use fsr_schemas::rounding::round2;

use crate::CumulativeTotals;

/// Add this shift onto the previous period's totals.
///
/// Volumes add; the loss percent does not. It is recomputed from the
/// accumulated variance over the accumulated movement (0 when nothing moved).
pub fn accumulate(
    previous: Option<&CumulativeTotals>,
    volume_sold_l: f64,
    variance_l: f64,
    tank_movement_l: f64,
) -> CumulativeTotals {
    let base = previous.copied().unwrap_or_default();

    let variance_l = round2(base.variance_l + variance_l);
    let tank_movement_l = round2(base.tank_movement_l + tank_movement_l);
    let loss_percent = if tank_movement_l == 0.0 {
        0.0
    } else {
        round2(variance_l / tank_movement_l * 100.0)
    };

    CumulativeTotals {
        shift_count: base.shift_count.saturating_add(1),
        volume_sold_l: round2(base.volume_sold_l + volume_sold_l),
        variance_l,
        tank_movement_l,
        loss_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_shift_starts_from_zero() {
        let c = accumulate(None, 1_739.86, -29.71, 1_769.57);
        assert_eq!(c.shift_count, 1);
        assert_eq!(c.volume_sold_l, 1_739.86);
        assert_eq!(c.loss_percent, -1.68);
    }

    #[test]
    fn loss_percent_is_recomputed_not_summed() {
        let first = accumulate(None, 990.0, -10.0, 1_000.0);
        let second = accumulate(Some(&first), 3_000.0, 0.0, 3_000.0);
        assert_eq!(first.loss_percent, -1.0);
        // -10 / 4000, not -1.0 + 0.0
        assert_eq!(second.loss_percent, -0.25);
        assert_eq!(second.shift_count, 2);
    }
}
