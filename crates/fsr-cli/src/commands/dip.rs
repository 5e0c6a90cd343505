//! `fsr dip`: chart lookups for one tank.

use anyhow::Result;
use fsr_calibration::{validate_dip, volume_to_dip, TankRegistry};
use fsr_config::UnusedKeyPolicy;
use fsr_schemas::{rounding::round2, TankId, ThresholdConfig};

use super::load_config;

pub fn run_dip(
    config_paths: Vec<String>,
    tank: &str,
    dip: Option<f64>,
    volume: Option<f64>,
) -> Result<()> {
    let loaded = load_config(config_paths, UnusedKeyPolicy::Warn)?;
    let registry = TankRegistry::from_config_json(&loaded.config_json)?;
    let thresholds = ThresholdConfig::from_config_json(&loaded.config_json)?;
    let tank = registry.get(&TankId::new(tank))?;

    println!("tank_id={}", tank.id);
    println!("fuel_type={}", tank.fuel_type);

    match (dip, volume) {
        (Some(dip_cm), _) => {
            let check = validate_dip(tank, dip_cm, thresholds.low_fuel_percent)?;
            println!("dip_cm={}", check.dip_cm);
            println!("volume_l={:.2}", round2(check.volume_l));
            println!("low_fuel={}", check.low_fuel);
            if let Some(advisory) = check.advisory {
                eprintln!("WARN: {advisory}");
            }
        }
        (None, Some(volume_l)) => {
            if !volume_l.is_finite() || volume_l < 0.0 || volume_l > tank.capacity_l {
                anyhow::bail!(
                    "volume {volume_l} L is outside tank {} range 0..={:.2} L",
                    tank.id,
                    tank.capacity_l
                );
            }
            println!("volume_l={:.2}", volume_l);
            println!("dip_cm={:.2}", round2(volume_to_dip(tank, volume_l)));
        }
        (None, None) => anyhow::bail!("pass --dip <cm> or --volume <l>"),
    }
    Ok(())
}
