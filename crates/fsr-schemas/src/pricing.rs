use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::thresholds::number_from_value;
use crate::FuelType;

/// Pump price per liter, per fuel type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    pub prices: BTreeMap<FuelType, f64>,
}

impl PriceBook {
    pub fn with_price(mut self, fuel: FuelType, price_per_l: f64) -> Self {
        self.prices.insert(fuel, price_per_l);
        self
    }

    pub fn price_for(&self, fuel: FuelType) -> Option<f64> {
        self.prices.get(&fuel).copied()
    }

    /// Build from canonical config JSON: `/pricing` maps fuel type names to a
    /// positive price per liter. A missing section yields an empty book.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut book = Self::default();
        let Some(section) = cfg.pointer("/pricing") else {
            return Ok(book);
        };
        let map = section
            .as_object()
            .context("config pricing must be a mapping of fuel type -> price")?;

        for (name, raw) in map {
            let fuel: FuelType = name.parse().map_err(|e: String| anyhow!(e))?;
            let price =
                number_from_value(raw).with_context(|| format!("invalid pricing.{name}"))?;
            if !price.is_finite() || price <= 0.0 {
                return Err(anyhow!("pricing.{name} must be > 0 (got {price})"));
            }
            book.prices.insert(fuel, price);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_prices_by_fuel_name() {
        let cfg = json!({ "pricing": { "petrol": 182.5, "DIESEL": "195" } });
        let book = PriceBook::from_config_json(&cfg).unwrap();
        assert_eq!(book.price_for(FuelType::Petrol), Some(182.5));
        assert_eq!(book.price_for(FuelType::Diesel), Some(195.0));
        assert_eq!(book.price_for(FuelType::Kerosene), None);
    }

    #[test]
    fn zero_price_rejected() {
        let cfg = json!({ "pricing": { "PETROL": 0 } });
        assert!(PriceBook::from_config_json(&cfg).is_err());
    }
}
