//! Variance Classifier: pass/warning/fail bands come from the caller's
//! thresholds, never from shared state.

use fsr_reconcile::*;
use fsr_schemas::ThresholdConfig;

fn bands(pass: f64, warning: f64) -> ThresholdConfig {
    ThresholdConfig {
        pass_percent: pass,
        warning_percent: warning,
        ..ThresholdConfig::default()
    }
}

#[test]
fn electronic_short_of_movement_is_warning_at_default_bands() {
    let r = classify(1_769.57, 1_739.855, &bands(1.0, 2.0));
    assert!((r.variance - (-29.715)).abs() < 1e-9);
    let pct = r.percent.unwrap();
    assert!((pct - (-1.679221)).abs() < 1e-4, "pct={pct}");
    assert_eq!(r.status, ValidationStatus::Warning);
    assert!(r.message.contains("less than"), "{}", r.message);
}

#[test]
fn same_variance_fails_at_tighter_bands() {
    let r = classify(1_769.57, 1_739.855, &bands(0.5, 1.0));
    assert_eq!(r.status, ValidationStatus::Fail);
    assert!(r.message.contains("possible leak"), "{}", r.message);
    assert!(r.message.contains("investigate"));
}

#[test]
fn over_reading_fails_with_investigate_but_no_leak() {
    let r = classify(1_000.0, 1_050.0, &bands(1.0, 2.0));
    assert_eq!(r.status, ValidationStatus::Fail);
    assert!(r.message.contains("more than"));
    assert!(r.message.contains("investigate"));
    assert!(!r.message.contains("leak"));
}

#[test]
fn identical_figures_pass_with_zero_variance() {
    for x in [0.01, 1.0, 1_769.57, 50_000.0] {
        for t in [bands(0.1, 0.2), bands(1.0, 2.0), bands(5.0, 5.0)] {
            let r = classify(x, x, &t);
            assert_eq!(r.status, ValidationStatus::Pass);
            assert_eq!(r.variance, 0.0);
            assert_eq!(r.percent, Some(0.0));
        }
    }
}

#[test]
fn zero_reference_is_warning_without_percent() {
    let r = classify(0.0, 120.0, &ThresholdConfig::default());
    assert_eq!(r.status, ValidationStatus::Warning);
    assert_eq!(r.percent, None);
    assert_eq!(r.variance, 120.0);
    assert!(r.message.contains("zero"));
}

#[test]
fn labels_appear_in_message() {
    let r = classify_labeled(
        1_769.57,
        1_739.855,
        &ThresholdConfig::default(),
        VarianceLabels {
            reference: "tank movement",
            comparison: "electronic sales",
        },
    );
    assert!(r.message.starts_with("Electronic sales is"), "{}", r.message);
    assert!(r.message.contains("tank movement"));
}

#[test]
fn status_serializes_screaming() {
    let v = serde_json::to_value(ValidationStatus::Warning).unwrap();
    assert_eq!(v, serde_json::json!("WARNING"));
    assert_eq!(ValidationStatus::Fail.as_str(), "FAIL");
}
