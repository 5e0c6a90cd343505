use fsr_schemas::ThresholdConfig;

use crate::{ValidationStatus, VarianceLabels, VarianceResult};

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Classify `comparison` against `reference` with generic labels.
pub fn classify(reference: f64, comparison: f64, thresholds: &ThresholdConfig) -> VarianceResult {
    classify_labeled(reference, comparison, thresholds, VarianceLabels::default())
}

/// Classify `comparison` against `reference` using the pass/warning bands.
///
/// - reference == 0 => WARNING, percent `None`
/// - |variance| / reference × 100 <= pass => PASS
/// - <= warning => WARNING
/// - otherwise FAIL
pub fn classify_labeled(
    reference: f64,
    comparison: f64,
    thresholds: &ThresholdConfig,
    labels: VarianceLabels<'_>,
) -> VarianceResult {
    let variance = comparison - reference;
    let subject = capitalized(labels.comparison);

    if reference == 0.0 {
        return VarianceResult {
            reference,
            comparison,
            variance,
            percent: None,
            status: ValidationStatus::Warning,
            message: format!(
                "{} is zero; {} of {:.2} L (variance {:+.2} L) cannot be expressed as a percentage",
                capitalized(labels.reference),
                labels.comparison,
                comparison,
                variance
            ),
        };
    }

    let signed_percent = variance / reference.abs() * 100.0;
    let pct = signed_percent.abs();
    let direction = if variance < 0.0 { "less than" } else { "more than" };

    let (status, message) = if pct <= thresholds.pass_percent {
        (
            ValidationStatus::Pass,
            format!(
                "{subject} is within {:.2}% of {} ({:+.2} L); pass band {:.2}%",
                pct, labels.reference, variance, thresholds.pass_percent
            ),
        )
    } else if pct <= thresholds.warning_percent {
        (
            ValidationStatus::Warning,
            format!(
                "{subject} is {:.2} L ({:.2}%) {direction} {}; above pass band {:.2}%, within warning band {:.2}%",
                variance.abs(),
                pct,
                labels.reference,
                thresholds.pass_percent,
                thresholds.warning_percent
            ),
        )
    } else {
        let escalation = if variance < 0.0 {
            "possible leak or theft, investigate"
        } else {
            "possible unrecorded delivery or meter fault, investigate"
        };
        (
            ValidationStatus::Fail,
            format!(
                "{subject} is {:.2} L ({:.2}%) {direction} {}, beyond warning band {:.2}%: {escalation}",
                variance.abs(),
                pct,
                labels.reference,
                thresholds.warning_percent
            ),
        )
    };

    VarianceResult {
        reference,
        comparison,
        variance,
        percent: Some(signed_percent),
        status,
        message,
    }
}
