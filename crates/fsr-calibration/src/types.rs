use fsr_schemas::{FuelType, TankId};
use serde::{Deserialize, Serialize};

/// Errors raised by chart construction, dip validation and tank lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    #[error("RangeError: dip {dip_cm} cm outside calibration range 0..={max_dip_cm} cm for tank {tank_id}")]
    Range {
        tank_id: TankId,
        dip_cm: f64,
        max_dip_cm: f64,
    },

    #[error("invalid calibration for tank {tank_id}: {reason}")]
    InvalidTable { tank_id: TankId, reason: String },

    #[error("unknown tank: {0}")]
    UnknownTank(TankId),
}

/// One chart row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub dip_cm: f64,
    pub volume_l: f64,
}

impl Breakpoint {
    pub fn new(dip_cm: f64, volume_l: f64) -> Self {
        Self { dip_cm, volume_l }
    }
}

/// Sorted, immutable breakpoint chart.
///
/// Invariants (enforced by [`CalibrationTable::new`]):
/// - first breakpoint is `(0, 0)` (prepended when the chart starts above 0)
/// - dips and volumes strictly increasing
/// - no volume above tank capacity
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationTable {
    points: Vec<Breakpoint>,
}

impl CalibrationTable {
    pub fn new(
        tank_id: &TankId,
        mut points: Vec<Breakpoint>,
        capacity_l: f64,
    ) -> Result<Self, CalibrationError> {
        let invalid = |reason: String| CalibrationError::InvalidTable {
            tank_id: tank_id.clone(),
            reason,
        };

        if points.is_empty() {
            return Err(invalid("chart has no breakpoints".to_string()));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !p.dip_cm.is_finite() || !p.volume_l.is_finite())
        {
            return Err(invalid(format!(
                "non-finite breakpoint ({}, {})",
                bad.dip_cm, bad.volume_l
            )));
        }
        if let Some(bad) = points.iter().find(|p| p.dip_cm < 0.0 || p.volume_l < 0.0) {
            return Err(invalid(format!(
                "negative breakpoint ({}, {})",
                bad.dip_cm, bad.volume_l
            )));
        }

        points.sort_by(|a, b| a.dip_cm.total_cmp(&b.dip_cm));

        if points[0].dip_cm == 0.0 {
            if points[0].volume_l != 0.0 {
                return Err(invalid(format!(
                    "volume at dip 0 must be 0 (got {})",
                    points[0].volume_l
                )));
            }
        } else {
            points.insert(0, Breakpoint::new(0.0, 0.0));
        }

        for w in points.windows(2) {
            if w[1].dip_cm <= w[0].dip_cm {
                return Err(invalid(format!("duplicate dip {} cm", w[1].dip_cm)));
            }
            if w[1].volume_l <= w[0].volume_l {
                return Err(invalid(format!(
                    "volume not strictly increasing at dip {} cm ({} <= {})",
                    w[1].dip_cm, w[1].volume_l, w[0].volume_l
                )));
            }
        }

        if let Some(last) = points.last() {
            if last.volume_l > capacity_l {
                return Err(invalid(format!(
                    "chart volume {} exceeds capacity {}",
                    last.volume_l, capacity_l
                )));
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Highest dip on the chart.
    pub fn max_dip_cm(&self) -> f64 {
        self.points.last().map(|p| p.dip_cm).unwrap_or(0.0)
    }

    /// Volume at the highest dip on the chart.
    pub fn max_volume_l(&self) -> f64 {
        self.points.last().map(|p| p.volume_l).unwrap_or(0.0)
    }
}

/// Raw shape of a tank as written in configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TankSpec {
    pub id: TankId,
    pub fuel_type: FuelType,
    pub capacity_l: f64,
    /// `[dip_cm, volume_l]` rows.
    pub chart: Vec<[f64; 2]>,
}

/// A storage tank with a validated calibration chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TankSpec", into = "TankSpec")]
pub struct Tank {
    pub id: TankId,
    pub fuel_type: FuelType,
    pub capacity_l: f64,
    pub chart: CalibrationTable,
}

impl Tank {
    pub fn new(
        id: TankId,
        fuel_type: FuelType,
        capacity_l: f64,
        breakpoints: Vec<Breakpoint>,
    ) -> Result<Self, CalibrationError> {
        if !capacity_l.is_finite() || capacity_l <= 0.0 {
            return Err(CalibrationError::InvalidTable {
                tank_id: id,
                reason: format!("capacity must be > 0 (got {capacity_l})"),
            });
        }
        let chart = CalibrationTable::new(&id, breakpoints, capacity_l)?;
        Ok(Self {
            id,
            fuel_type,
            capacity_l,
            chart,
        })
    }
}

impl TryFrom<TankSpec> for Tank {
    type Error = CalibrationError;

    fn try_from(spec: TankSpec) -> Result<Self, Self::Error> {
        let points = spec
            .chart
            .iter()
            .map(|[dip, vol]| Breakpoint::new(*dip, *vol))
            .collect();
        Tank::new(spec.id, spec.fuel_type, spec.capacity_l, points)
    }
}

impl From<Tank> for TankSpec {
    fn from(t: Tank) -> Self {
        TankSpec {
            id: t.id,
            fuel_type: t.fuel_type,
            capacity_l: t.capacity_l,
            chart: t
                .chart
                .points()
                .iter()
                .map(|p| [p.dip_cm, p.volume_l])
                .collect(),
        }
    }
}

/// Outcome of [`crate::validate_dip`] for an in-range dip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DipCheck {
    pub dip_cm: f64,
    pub volume_l: f64,
    pub low_fuel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}
