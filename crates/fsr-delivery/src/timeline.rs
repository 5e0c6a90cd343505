use fsr_schemas::rounding::{round2, within, VOLUME_EPSILON_L};
use fsr_schemas::Delivery;

use crate::validator::sort_chronologically;
use crate::{
    Boundary, DeliveryEvent, InteriorRise, SalesSegment, Timeline, TimelineError, TimelineEvent,
};

fn sales_segment(
    from: Boundary,
    to: Boundary,
    start_level_l: f64,
    end_level_l: f64,
    rise: InteriorRise,
    warnings: &mut Vec<String>,
) -> Result<SalesSegment, TimelineError> {
    let raw = round2(start_level_l - end_level_l);
    if raw < -VOLUME_EPSILON_L {
        if rise == InteriorRise::Reject || to == Boundary::ShiftClose {
            return Err(TimelineError::NegativeSales {
                from,
                to,
                rise_l: -raw,
            });
        }
        warnings.push(format!(
            "LEVEL_RISE: tank level rose by {:.2} L between {} and {} without a recorded delivery",
            -raw, from, to
        ));
        return Ok(SalesSegment {
            from,
            to,
            start_level_l,
            end_level_l,
            sales_l: raw,
        });
    }
    // Within epsilon of zero counts as no sales, not a tiny negative.
    let sales_l = raw.max(0.0);
    Ok(SalesSegment {
        from,
        to,
        start_level_l,
        end_level_l,
        sales_l,
    })
}

/// Walk the shift forward and attribute sales to each interval.
///
/// - before the first delivery: `opening − first.before`
/// - between deliveries: `previous.after − next.before`
/// - after the last delivery: `last.after − closing`
///
/// A segment more negative than the volume epsilon means the level rose
/// without a recorded delivery and is an error. The segment sum is
/// cross-checked against `(opening − closing) + Σ delivered`; a mismatch is
/// only a warning.
pub fn reconstruct_timeline(
    opening_l: f64,
    closing_l: f64,
    deliveries: &[Delivery],
) -> Result<Timeline, TimelineError> {
    reconstruct_timeline_with(opening_l, closing_l, deliveries, InteriorRise::Reject)
}

/// [`reconstruct_timeline`] with a choice for rises ahead of a delivery.
///
/// Under [`InteriorRise::Warn`] such a segment keeps its negative sales
/// figure, so the segment sum still matches the movement, and the rise is
/// reported in `warnings`. A rise after the last delivery stays an error.
pub fn reconstruct_timeline_with(
    opening_l: f64,
    closing_l: f64,
    deliveries: &[Delivery],
    rise: InteriorRise,
) -> Result<Timeline, TimelineError> {
    if !opening_l.is_finite() {
        return Err(TimelineError::NonFinite("opening volume"));
    }
    if !closing_l.is_finite() {
        return Err(TimelineError::NonFinite("closing volume"));
    }
    if deliveries
        .iter()
        .any(|d| !d.volume_before_l.is_finite() || !d.volume_after_l.is_finite())
    {
        return Err(TimelineError::NonFinite("delivery volume"));
    }

    let mut sorted = deliveries.to_vec();
    sort_chronologically(&mut sorted);

    let mut warnings = Vec::new();
    let mut events = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut level = opening_l;
    let mut from = Boundary::ShiftOpen;

    for (index, d) in sorted.iter().enumerate() {
        let to = Boundary::Delivery {
            index,
            delivered_at: d.delivered_at,
        };
        let seg = sales_segment(from, to.clone(), level, d.volume_before_l, rise, &mut warnings)?;
        events.push(TimelineEvent::Sales(seg));

        let delivered_l = round2(d.volume_delivered_l());
        events.push(TimelineEvent::Delivery(DeliveryEvent {
            index,
            delivered_at: d.delivered_at,
            supplier: d.supplier.clone(),
            volume_before_l: d.volume_before_l,
            volume_after_l: d.volume_after_l,
            delivered_l,
        }));

        level = d.volume_after_l;
        from = to;
    }

    let last = sales_segment(from, Boundary::ShiftClose, level, closing_l, rise, &mut warnings)?;
    events.push(TimelineEvent::Sales(last));

    let total_delivered_l = round2(sorted.iter().map(Delivery::volume_delivered_l).sum());
    let total_sales_l = round2(
        events
            .iter()
            .filter_map(|e| match e {
                TimelineEvent::Sales(s) => Some(s.sales_l),
                TimelineEvent::Delivery(_) => None,
            })
            .sum(),
    );
    let expected_movement_l = round2((opening_l - closing_l) + total_delivered_l);

    let cross_check_ok = within(total_sales_l, expected_movement_l, VOLUME_EPSILON_L);
    if !cross_check_ok {
        warnings.push(format!(
            "TIMELINE_MISMATCH: interval sales sum to {:.2} L but (opening − closing) + deliveries = {:.2} L; check manually entered levels",
            total_sales_l, expected_movement_l
        ));
    }

    Ok(Timeline {
        events,
        total_sales_l,
        total_delivered_l,
        expected_movement_l,
        cross_check_ok,
        warnings,
    })
}
