use anyhow::{Context, Result};
use fsr_calibration::TankRegistry;
use fsr_schemas::{PriceBook, ThresholdConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LoadedConfig;

/// Station identity, used for labelling output only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Station {
    /// `/station` is optional; `name` is required when the section exists.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        match cfg.pointer("/station") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(raw) => {
                serde_json::from_value(raw.clone()).context("config station has an invalid shape")
            }
        }
    }
}

/// Everything the engine reads from configuration, extracted and validated.
#[derive(Clone, Debug)]
pub struct StationConfig {
    pub config_hash: String,
    pub station: Station,
    pub thresholds: ThresholdConfig,
    pub prices: PriceBook,
    pub tanks: TankRegistry,
}

impl StationConfig {
    pub fn from_loaded(loaded: &LoadedConfig) -> Result<Self> {
        let cfg = &loaded.config_json;
        Ok(Self {
            config_hash: loaded.config_hash.clone(),
            station: Station::from_config_json(cfg)?,
            thresholds: ThresholdConfig::from_config_json(cfg)?,
            prices: PriceBook::from_config_json(cfg)?,
            tanks: TankRegistry::from_config_json(cfg)?,
        })
    }
}
