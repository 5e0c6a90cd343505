use anyhow::{Context, Result};
use fsr_schemas::TankId;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{CalibrationError, Tank, TankSpec};

/// Tank id -> tank, loaded once at startup and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TankRegistry {
    tanks: BTreeMap<TankId, Tank>,
}

impl TankRegistry {
    /// Build from already-validated tanks. Duplicate ids are rejected.
    pub fn new(tanks: impl IntoIterator<Item = Tank>) -> Result<Self, CalibrationError> {
        let mut map = BTreeMap::new();
        for t in tanks {
            if map.contains_key(&t.id) {
                return Err(CalibrationError::InvalidTable {
                    tank_id: t.id.clone(),
                    reason: "tank id registered twice".to_string(),
                });
            }
            map.insert(t.id.clone(), t);
        }
        Ok(Self { tanks: map })
    }

    pub fn get(&self, id: &TankId) -> Result<&Tank, CalibrationError> {
        self.tanks
            .get(id)
            .ok_or_else(|| CalibrationError::UnknownTank(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.tanks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tanks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tank> {
        self.tanks.values()
    }

    /// Build from canonical config JSON (produced by fsr-config).
    ///
    /// Required: `/tanks` as a list of `{ id, fuel_type, capacity_l, chart }`
    /// where `chart` is a list of `[dip_cm, volume_l]` rows.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let raw = cfg.pointer("/tanks").context("config missing tanks")?;
        let specs: Vec<TankSpec> =
            serde_json::from_value(raw.clone()).context("config tanks has an invalid shape")?;

        let mut tanks = Vec::with_capacity(specs.len());
        for spec in specs {
            let id = spec.id.clone();
            let tank =
                Tank::try_from(spec).with_context(|| format!("config tanks entry '{id}'"))?;
            tanks.push(tank);
        }
        Ok(Self::new(tanks)?)
    }
}
