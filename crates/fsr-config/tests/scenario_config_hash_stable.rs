//! Config hash stability
//!
//! GREEN when:
//! - the same inputs hash identically
//! - key order within YAML does not change the hash
//! - different values produce different hashes
//! - overlays override the base and hash stably

use fsr_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
station:
  name: "Ring Road Service Station"
  code: "RR-01"
thresholds:
  pass_percent: 1.0
  warning_percent: 2.0
pricing:
  PETROL: 650
  DIESEL: 700
"#;

/// Same content as BASE_YAML with keys in a different order.
const BASE_YAML_REORDERED: &str = r#"
pricing:
  DIESEL: 700
  PETROL: 650
thresholds:
  warning_percent: 2.0
  pass_percent: 1.0
station:
  code: "RR-01"
  name: "Ring Road Service Station"
"#;

const OVERLAY_YAML: &str = r#"
thresholds:
  pass_percent: 0.5
pricing:
  PETROL: 655
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
    assert_eq!(original.canonical_json, reordered.canonical_json);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_base_and_keeps_siblings() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);

    let pass = a
        .config_json
        .pointer("/thresholds/pass_percent")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!((pass - 0.5).abs() < 1e-9, "overlay should override pass_percent");

    let warning = a
        .config_json
        .pointer("/thresholds/warning_percent")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!((warning - 2.0).abs() < 1e-9, "sibling keys survive the merge");

    assert_eq!(
        a.config_json.pointer("/pricing/DIESEL").and_then(|v| v.as_i64()),
        Some(700)
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn invalid_yaml_is_an_error() {
    let err = load_layered_yaml_from_strings(&["thresholds: [unclosed"]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid yaml"));
}
