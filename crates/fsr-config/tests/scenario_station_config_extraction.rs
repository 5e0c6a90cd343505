//! Typed extraction of the station configuration from layered YAML.

use fsr_config::{load_layered_yaml_from_strings, StationConfig};
use fsr_schemas::{FuelType, TankId};

const STATION_YAML: &str = r#"
station:
  name: "Ring Road Service Station"
thresholds:
  pass_percent: 1.0
  warning_percent: 2.0
pricing:
  PETROL: 650
  DIESEL: "700"
tanks:
  - id: T1
    fuel_type: PETROL
    capacity_l: 33000
    chart: [[20, 1500], [50, 5200], [100, 12800], [150, 21000], [200, 28900], [230, 33000]]
"#;

#[test]
fn all_sections_are_extracted() {
    let loaded = load_layered_yaml_from_strings(&[STATION_YAML]).unwrap();
    let cfg = StationConfig::from_loaded(&loaded).unwrap();

    assert_eq!(cfg.station.name, "Ring Road Service Station");
    assert_eq!(cfg.station.code, None);
    assert_eq!(cfg.config_hash, loaded.config_hash);
    assert_eq!(cfg.thresholds.warning_percent, 2.0);
    // Absent keys keep their defaults.
    assert_eq!(cfg.thresholds.volume_tolerance_l, 50.0);
    assert_eq!(cfg.prices.price_for(FuelType::Diesel), Some(700.0));
    assert_eq!(cfg.tanks.get(&TankId::new("T1")).unwrap().capacity_l, 33_000.0);
}

#[test]
fn inverted_bands_are_rejected() {
    let overlay = r#"
thresholds:
  pass_percent: 3.0
"#;
    let loaded = load_layered_yaml_from_strings(&[STATION_YAML, overlay]).unwrap();
    let err = StationConfig::from_loaded(&loaded).unwrap_err();
    assert!(format!("{err:#}").contains("pass_percent"), "{err:#}");
}

#[test]
fn missing_tanks_is_an_error() {
    let loaded = load_layered_yaml_from_strings(&["station: {name: X}"]).unwrap();
    let err = StationConfig::from_loaded(&loaded).unwrap_err();
    assert!(format!("{err:#}").contains("tanks"), "{err:#}");
}
