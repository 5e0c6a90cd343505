use fsr_schemas::rounding::round2;
use fsr_schemas::Delivery;

use crate::{DeliveryVolumes, MovementFormula, TankMovement};

/// Net volume dispensed from the tank over a shift.
///
/// One formula per `DeliveryVolumes` variant. A closing of zero or less is
/// treated as unset: movement 0, flagged incomplete. The result uses the
/// shared 2-decimal policy.
pub fn tank_movement(opening_l: f64, closing_l: f64, deliveries: &DeliveryVolumes<'_>) -> TankMovement {
    if closing_l <= 0.0 {
        return TankMovement {
            movement_l: 0.0,
            formula: MovementFormula::IncompleteClosing,
            delivered_l: None,
            incomplete: true,
        };
    }

    let (raw, formula, delivered_l) = match *deliveries {
        DeliveryVolumes::None => (opening_l - closing_l, MovementFormula::NoDelivery, Some(0.0)),
        DeliveryVolumes::Legacy {
            before_offload_l: Some(before),
            after_offload_l,
        } => (
            (opening_l - before) + (after_offload_l - closing_l),
            MovementFormula::LegacyOffload,
            Some(after_offload_l - before),
        ),
        DeliveryVolumes::Legacy {
            before_offload_l: None,
            after_offload_l,
        } => (
            after_offload_l - closing_l,
            MovementFormula::LegacyAfterOffloadOnly,
            None,
        ),
        DeliveryVolumes::Many(list) => {
            let delivered: f64 = list.iter().map(Delivery::volume_delivered_l).sum();
            (
                (opening_l - closing_l) + delivered,
                MovementFormula::MultipleDeliveries,
                Some(delivered),
            )
        }
    };

    TankMovement {
        movement_l: round2(raw),
        formula,
        delivered_l: delivered_l.map(round2),
        incomplete: false,
    }
}
