use fsr_schemas::rounding::{abs_percent_of, round2};
use fsr_schemas::ThresholdConfig;

use crate::{
    NozzleSource, OverallStatus, PairComparison, PairKind, PairStatus, PairUnit, RootCause,
    RootCauseCategory, ThreeWayAnalysis, ThreeWayInput,
};

/// Root cause over (tank-nozzle, tank-cash, nozzle-cash) within tolerance.
///
/// One failing pair points at the source that pair excludes; two failing
/// pairs point at the source they share; all three failing is systemic.
pub fn root_cause_for(tank_nozzle_ok: bool, tank_cash_ok: bool, nozzle_cash_ok: bool) -> Option<RootCauseCategory> {
    use RootCauseCategory::*;
    match (tank_nozzle_ok, tank_cash_ok, nozzle_cash_ok) {
        (true, true, true) => None,
        (false, true, true) => Some(Financial),
        (true, false, true) => Some(Operational),
        (true, true, false) => Some(Physical),
        (false, false, true) => Some(Physical),
        (false, true, false) => Some(Operational),
        (true, false, false) => Some(Financial),
        (false, false, false) => Some(Multiple),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn root_cause(category: RootCauseCategory) -> RootCause {
    let (likely_causes, recommendations) = match category {
        RootCauseCategory::Physical => (
            strings(&[
                "tank leak or seepage",
                "dip stick or calibration chart error",
                "delivery received but not recorded",
                "temperature expansion or contraction of stock",
            ]),
            strings(&[
                "re-dip the tank and check the reading against the calibration chart",
                "check delivery notes and invoices for an unrecorded offload",
                "schedule a tank integrity test",
            ]),
        ),
        RootCauseCategory::Operational => (
            strings(&[
                "nozzle meter misread or transcription error",
                "meter calibration drift",
                "pump test volume returned to tank but not recorded",
                "meter reset during the shift",
            ]),
            strings(&[
                "re-read electronic and mechanical totals on every nozzle",
                "compare electronic and mechanical movement per nozzle",
                "request a meter calibration check",
            ]),
        ),
        RootCauseCategory::Financial => (
            strings(&[
                "cash shortage or theft",
                "credit or voucher sales not counted in banked cash",
                "pump price differs from the price book",
                "banking or counting error",
            ]),
            strings(&[
                "recount banked cash and reconcile card settlements",
                "collect credit sale and voucher records for the shift",
                "verify the pump price against the price book",
            ]),
        ),
        RootCauseCategory::Multiple => (
            strings(&[
                "systemic recording failure across sources",
                "readings captured for the wrong tank or shift period",
                "combined stock loss and recording errors",
            ]),
            strings(&[
                "review all three sources with the shift supervisor",
                "confirm every reading belongs to the same tank and shift",
                "escalate for a full stock audit",
            ]),
        ),
        RootCauseCategory::Unknown => (
            strings(&["tank and nozzle disagree and no cash was reported, so the outlier cannot be isolated"]),
            strings(&[
                "submit the banked cash for the shift to complete the three-way check",
                "re-dip the tank and re-read the nozzle meters",
            ]),
        ),
    };
    RootCause {
        category,
        likely_causes,
        recommendations,
    }
}

fn compare_pair(
    pair: PairKind,
    unit: PairUnit,
    reference: f64,
    comparison: f64,
    abs_tolerance: f64,
    pct_tolerance: f64,
    critical_percent: f64,
) -> PairComparison {
    let diff = comparison - reference;
    let percent = abs_percent_of(diff, reference).unwrap_or(0.0);
    let abs_breached = diff.abs() > abs_tolerance;
    let pct_breached = percent > pct_tolerance;

    let status = if !abs_breached && !pct_breached {
        PairStatus::WithinTolerance
    } else if percent > critical_percent {
        PairStatus::Critical
    } else {
        PairStatus::RequiresInvestigation
    };

    let unit_label = match unit {
        PairUnit::Liters => "L",
        PairUnit::Currency => "",
    };
    let message = match status {
        PairStatus::WithinTolerance => format!(
            "{}: difference {:+.2}{unit_label} ({:.2}%) within tolerance",
            pair.label(),
            diff,
            percent
        ),
        PairStatus::RequiresInvestigation | PairStatus::Critical => {
            let mut breached = Vec::with_capacity(2);
            if abs_breached {
                breached.push(format!("absolute {:.2}{unit_label}", abs_tolerance));
            }
            if pct_breached {
                breached.push(format!("percent {:.2}%", pct_tolerance));
            }
            let tier = if status == PairStatus::Critical {
                "CRITICAL"
            } else {
                "requires investigation"
            };
            format!(
                "{}: difference {:+.2}{unit_label} ({:.2}%) breaches {} tolerance; {tier}",
                pair.label(),
                diff,
                percent,
                breached.join(" and ")
            )
        }
    };

    PairComparison {
        pair,
        unit,
        reference,
        comparison,
        difference: round2(diff),
        percent: round2(percent),
        abs_breached,
        pct_breached,
        status,
        message,
    }
}

fn overall_status(tank_vs_nozzle: &PairComparison, cash_pairs: &[&PairComparison]) -> OverallStatus {
    if cash_pairs.is_empty() && !tank_vs_nozzle.is_within() {
        return OverallStatus::IncompleteData;
    }

    let all: Vec<&PairComparison> = std::iter::once(tank_vs_nozzle)
        .chain(cash_pairs.iter().copied())
        .collect();

    if all.iter().all(|p| p.is_within()) {
        OverallStatus::Balanced
    } else if all.iter().any(|p| p.status == PairStatus::Critical) {
        OverallStatus::DiscrepancyCritical
    } else if all
        .iter()
        .any(|p| !p.is_within() && p.abs_breached && p.pct_breached)
    {
        OverallStatus::VarianceInvestigation
    } else {
        OverallStatus::VarianceMinor
    }
}

/// Three-way reconciliation of tank, nozzle and cash figures.
///
/// The nozzle figure is the electronic total unless it is zero, in which case
/// the mechanical total stands in. Cash pairs are computed only when actual
/// cash is reported and the price is positive.
pub fn analyze(input: &ThreeWayInput, thresholds: &ThresholdConfig) -> ThreeWayAnalysis {
    let mut messages = Vec::new();

    let (nozzle_total_l, nozzle_source) = if input.electronic_total_l == 0.0 {
        if input.mechanical_total_l != 0.0 {
            messages.push(format!(
                "electronic total is zero; using mechanical total {:.2} L",
                input.mechanical_total_l
            ));
        }
        (input.mechanical_total_l, NozzleSource::Mechanical)
    } else {
        (input.electronic_total_l, NozzleSource::Electronic)
    };

    let tank_vs_nozzle = compare_pair(
        PairKind::TankVsNozzle,
        PairUnit::Liters,
        input.tank_movement_l,
        nozzle_total_l,
        thresholds.volume_tolerance_l,
        thresholds.volume_tolerance_percent,
        thresholds.critical_percent,
    );
    messages.push(tank_vs_nozzle.message.clone());

    let cash = match input.actual_cash {
        Some(c) if input.price_per_l > 0.0 => Some(c),
        Some(_) => {
            messages.push("price per liter is not positive; cash comparisons skipped".to_string());
            None
        }
        None => {
            messages.push("no cash reported; cash comparisons skipped".to_string());
            None
        }
    };

    let (tank_vs_cash, nozzle_vs_cash) = match cash {
        Some(actual) => {
            let tc = compare_pair(
                PairKind::TankVsCash,
                PairUnit::Currency,
                input.tank_movement_l * input.price_per_l,
                actual,
                thresholds.cash_tolerance,
                thresholds.cash_tolerance_percent,
                thresholds.critical_percent,
            );
            let nc = compare_pair(
                PairKind::NozzleVsCash,
                PairUnit::Currency,
                nozzle_total_l * input.price_per_l,
                actual,
                thresholds.cash_tolerance,
                thresholds.cash_tolerance_percent,
                thresholds.critical_percent,
            );
            messages.push(tc.message.clone());
            messages.push(nc.message.clone());
            (Some(tc), Some(nc))
        }
        None => (None, None),
    };

    let cash_pairs: Vec<&PairComparison> = tank_vs_cash.iter().chain(nozzle_vs_cash.iter()).collect();
    let overall = overall_status(&tank_vs_nozzle, &cash_pairs);

    let category = match (&tank_vs_cash, &nozzle_vs_cash) {
        (Some(tc), Some(nc)) => root_cause_for(tank_vs_nozzle.is_within(), tc.is_within(), nc.is_within()),
        _ if !tank_vs_nozzle.is_within() => Some(RootCauseCategory::Unknown),
        _ => None,
    };
    let root_cause = category.map(root_cause);

    ThreeWayAnalysis {
        nozzle_total_l,
        nozzle_source,
        tank_vs_nozzle,
        tank_vs_cash,
        nozzle_vs_cash,
        overall,
        root_cause,
        messages,
    }
}
