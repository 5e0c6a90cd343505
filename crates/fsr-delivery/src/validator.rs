use fsr_schemas::rounding::{abs_percent_of, round2, DELIVERY_SLACK_L, VOLUME_EPSILON_L};
use fsr_schemas::{Delivery, ThresholdConfig};

use crate::{DeliveryIssue, DeliveryIssueCode, DeliveryReport, TankWindow};

/// Stable sort by `delivered_at`. Returns true if the order changed.
pub fn sort_chronologically(deliveries: &mut [Delivery]) -> bool {
    let was_sorted = deliveries
        .windows(2)
        .all(|w| w[0].delivered_at <= w[1].delivered_at);
    if !was_sorted {
        deliveries.sort_by_key(|d| d.delivered_at);
    }
    !was_sorted
}

fn check_single(
    window: &TankWindow,
    thresholds: &ThresholdConfig,
    i: usize,
    d: &Delivery,
    issues: &mut Vec<DeliveryIssue>,
) {
    let at = Some(i);
    let n = i + 1;

    if d.tank_id != window.tank_id {
        issues.push(DeliveryIssue::new(
            DeliveryIssueCode::WrongTank,
            at,
            format!(
                "delivery #{n} recorded against tank {} while reconciling tank {}",
                d.tank_id, window.tank_id
            ),
        ));
    }

    let finite = d.volume_before_l.is_finite() && d.volume_after_l.is_finite();
    if !finite || d.volume_before_l < 0.0 || d.volume_after_l < 0.0 {
        issues.push(DeliveryIssue::new(
            DeliveryIssueCode::InvalidVolume,
            at,
            format!(
                "delivery #{n} has invalid volumes (before {}, after {})",
                d.volume_before_l, d.volume_after_l
            ),
        ));
        // Nothing below is meaningful on garbage volumes.
        return;
    }

    if d.volume_after_l <= d.volume_before_l {
        issues.push(DeliveryIssue::new(
            DeliveryIssueCode::NonPositiveDelivery,
            at,
            format!(
                "delivery #{n} after-volume {:.2} L must exceed before-volume {:.2} L",
                d.volume_after_l, d.volume_before_l
            ),
        ));
    }

    if d.volume_after_l > window.capacity_l {
        issues.push(DeliveryIssue::new(
            DeliveryIssueCode::CapacityExceeded,
            at,
            format!(
                "delivery #{n} after-volume {:.2} L exceeds tank capacity {:.2} L",
                d.volume_after_l, window.capacity_l
            ),
        ));
    }

    let delivered = d.volume_delivered_l();

    if let Some(stated) = d.stated_volume_l {
        if (stated - delivered).abs() > VOLUME_EPSILON_L {
            issues.push(DeliveryIssue::new(
                DeliveryIssueCode::StatedVolumeMismatch,
                at,
                format!(
                    "delivery #{n} stated volume {:.2} L differs from after − before = {:.2} L",
                    stated, delivered
                ),
            ));
        }
    }

    if let Some(expected) = d.expected_volume_l {
        let off = delivered - expected;
        let pct = abs_percent_of(off, expected).unwrap_or(0.0);
        if pct > thresholds.volume_tolerance_percent {
            let dir = if off < 0.0 { "short" } else { "over" };
            issues.push(DeliveryIssue::new(
                DeliveryIssueCode::InvoiceVolumeMismatch,
                at,
                format!(
                    "delivery #{n} is {dir} by {:.2} L ({:.2}%) against invoice {} of {:.2} L",
                    off.abs(),
                    pct,
                    d.invoice_ref.as_deref().unwrap_or("(no ref)"),
                    expected
                ),
            ));
        }
    }

    let large_floor = window.capacity_l * thresholds.large_delivery_percent / 100.0;
    if delivered > large_floor {
        issues.push(DeliveryIssue::new(
            DeliveryIssueCode::LargeDelivery,
            at,
            format!(
                "delivery #{n} of {:.2} L is more than {:.0}% of tank capacity",
                delivered, thresholds.large_delivery_percent
            ),
        ));
    }
}

/// Validate all deliveries recorded against one tank in one shift.
///
/// Deliveries are re-sorted chronologically first; issue indices refer to
/// the sorted order held in the returned report. Never fails: FAIL issues are
/// reported and the caller decides whether to reject.
pub fn validate_deliveries(
    window: &TankWindow,
    deliveries: &[Delivery],
    thresholds: &ThresholdConfig,
) -> DeliveryReport {
    let mut sorted = deliveries.to_vec();
    let reordered = sort_chronologically(&mut sorted);
    let mut issues = Vec::new();

    // 1) Per-delivery checks.
    for (i, d) in sorted.iter().enumerate() {
        check_single(window, thresholds, i, d, &mut issues);
    }

    // 2) Consecutive deliveries: level may not jump up between them.
    for (i, w) in sorted.windows(2).enumerate() {
        let (prev, next) = (&w[0], &w[1]);
        let gap = next.volume_before_l - prev.volume_after_l;
        if gap > DELIVERY_SLACK_L {
            issues.push(DeliveryIssue::new(
                DeliveryIssueCode::SequenceGap,
                Some(i + 1),
                format!(
                    "delivery #{} before-volume {:.2} L exceeds delivery #{} after-volume {:.2} L by {:.2} L (slack {:.0} L): undocumented movement between deliveries",
                    i + 2,
                    next.volume_before_l,
                    i + 1,
                    prev.volume_after_l,
                    gap,
                    DELIVERY_SLACK_L
                ),
            ));
        }
    }

    // 3) Shift boundaries.
    if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
        let open_gap = first.volume_before_l - window.opening_l;
        if open_gap.abs() > DELIVERY_SLACK_L {
            issues.push(DeliveryIssue::new(
                DeliveryIssueCode::OpeningMismatch,
                None,
                format!(
                    "first delivery before-volume {:.2} L is {:.2} L away from shift opening {:.2} L (slack {:.0} L)",
                    first.volume_before_l,
                    open_gap.abs(),
                    window.opening_l,
                    DELIVERY_SLACK_L
                ),
            ));
        }

        // The tank can only have lost fuel after the last delivery.
        let residual_sold = last.volume_after_l - window.closing_l;
        if residual_sold < -VOLUME_EPSILON_L {
            issues.push(DeliveryIssue::new(
                DeliveryIssueCode::ClosingMismatch,
                None,
                format!(
                    "shift closing {:.2} L is above last delivery after-volume {:.2} L by {:.2} L",
                    window.closing_l,
                    last.volume_after_l,
                    -residual_sold
                ),
            ));
        }
    }

    // Stable report order: per-delivery issues by (index, code), then shift-level.
    issues.sort_by(|a, b| {
        let ka = (a.index.is_none(), a.index, a.code);
        let kb = (b.index.is_none(), b.index, b.code);
        ka.cmp(&kb)
    });

    let total_delivered_l = round2(sorted.iter().map(Delivery::volume_delivered_l).sum());

    DeliveryReport {
        deliveries: sorted,
        reordered,
        issues,
        total_delivered_l,
    }
}
