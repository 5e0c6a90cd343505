use fsr_calibration::{validate_dip, volume_to_dip, Tank};
use fsr_schemas::rounding::round2;
use fsr_schemas::TankLevel;

use crate::{LevelSummary, SubmissionError};

/// Turn a submitted level into a volume on this tank.
///
/// Dips go through the calibration chart and fail with a range error outside
/// it. Direct volumes must be finite, non-negative and within capacity.
pub(crate) fn resolve_level(
    tank: &Tank,
    level: TankLevel,
    what: &str,
) -> Result<LevelSummary, SubmissionError> {
    match level {
        TankLevel::DipCm(dip_cm) => {
            // Low-fuel advisories are raised for the closing level only.
            let check = validate_dip(tank, dip_cm, 0.0)?;
            Ok(LevelSummary {
                dip_cm: Some(dip_cm),
                volume_l: round2(check.volume_l),
                seeded_from_previous: false,
            })
        }
        TankLevel::VolumeL(volume_l) => {
            if !volume_l.is_finite() || volume_l < 0.0 {
                return Err(SubmissionError::invalid(format!(
                    "{what} volume must be a non-negative number (got {volume_l})"
                )));
            }
            if volume_l > tank.capacity_l {
                return Err(SubmissionError::invalid(format!(
                    "{what} volume {volume_l:.2} L exceeds tank {} capacity {:.2} L",
                    tank.id, tank.capacity_l
                )));
            }
            Ok(LevelSummary {
                dip_cm: None,
                volume_l,
                seeded_from_previous: false,
            })
        }
    }
}

/// Low-fuel advisory for a resolved level, judged on its chart dip.
pub(crate) fn low_fuel_advisory(
    tank: &Tank,
    level: &LevelSummary,
    low_fuel_percent: f64,
) -> Option<String> {
    let dip_cm = level
        .dip_cm
        .unwrap_or_else(|| volume_to_dip(tank, level.volume_l));
    validate_dip(tank, dip_cm, low_fuel_percent)
        .ok()
        .and_then(|check| check.advisory)
}
