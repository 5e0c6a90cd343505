use std::collections::BTreeSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use fsr_daily::{aggregate, DailyInput};
use fsr_delivery::{reconstruct_timeline_with, validate_deliveries, InteriorRise, TankWindow, Timeline};
use fsr_reconcile::{
    analyze, classify_labeled, tank_movement, DeliveryVolumes, NozzleSource, ThreeWayInput,
    ValidationStatus, VarianceLabels,
};
use fsr_schemas::rounding::VOLUME_EPSILON_L;
use fsr_schemas::{DeliveryInput, NozzleReading, ShiftKey};

use crate::levels::{low_fuel_advisory, resolve_level};
use crate::{
    Advisory, AdvisoryCode, Authorization, DeliveryForm, DeliverySummary, LevelSummary,
    ReconciliationRecord, SubmissionContext, SubmissionError, SubmissionInput,
};

/// Deterministic record id for a shift and sequence number.
///
/// **No RNG.** Uses `Uuid::new_v5` over the DNS namespace with a scoped
/// prefix, so a resubmission of identical inputs yields the same id.
pub fn record_id(shift: &ShiftKey, sequence: u32) -> Uuid {
    let data = format!("fsr-engine.record.v1|{}|{}", shift, sequence);
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, data.as_bytes())
}

/// Client payload, not yet checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    input: SubmissionInput,
}

/// A submission that passed every check, carrying its computed record.
#[derive(Clone, Debug, PartialEq)]
pub struct Validated {
    record: ReconciliationRecord,
}

impl Validated {
    pub fn record(&self) -> &ReconciliationRecord {
        &self.record
    }

    pub fn status(&self) -> ValidationStatus {
        self.record.validation_status
    }

    pub fn into_record(self) -> ReconciliationRecord {
        self.record
    }
}

/// `Draft::new(input).validate(ctx)` returning the record directly.
pub fn submit(
    input: SubmissionInput,
    ctx: &SubmissionContext<'_>,
) -> Result<ReconciliationRecord, SubmissionError> {
    Draft::new(input).validate(ctx).map(Validated::into_record)
}

// ---------------------------------------------------------------------------
// Input checks
// ---------------------------------------------------------------------------

fn check_nozzles(nozzles: &[NozzleReading]) -> Result<(), SubmissionError> {
    if nozzles.is_empty() {
        return Err(SubmissionError::invalid("at least one nozzle reading is required"));
    }
    let mut seen = BTreeSet::new();
    for n in nozzles {
        if n.nozzle_id.trim().is_empty() {
            return Err(SubmissionError::invalid("nozzle id must not be empty"));
        }
        if !seen.insert(n.nozzle_id.as_str()) {
            return Err(SubmissionError::invalid(format!(
                "nozzle {} reported twice",
                n.nozzle_id
            )));
        }
        for (meter, r) in [("electronic", &n.electronic), ("mechanical", &n.mechanical)] {
            if !r.opening.is_finite() || !r.closing.is_finite() {
                return Err(SubmissionError::invalid(format!(
                    "nozzle {} {meter} reading is not a number",
                    n.nozzle_id
                )));
            }
            if r.movement() < 0.0 {
                return Err(SubmissionError::invalid(format!(
                    "nozzle {} {meter} closing {} is below opening {}",
                    n.nozzle_id, r.closing, r.opening
                )));
            }
        }
    }
    Ok(())
}

fn check_no_delivery_rise(opening: &LevelSummary, closing: &LevelSummary) -> Result<(), SubmissionError> {
    if closing.volume_l > opening.volume_l + VOLUME_EPSILON_L {
        return Err(SubmissionError::invalid(format!(
            "closing {:.2} L is above opening {:.2} L with no delivery recorded",
            closing.volume_l, opening.volume_l
        )));
    }
    Ok(())
}

/// Offload levels must sit between the shift's opening and closing: the tank
/// can only fall before the offload and after it.
fn check_offload_sequence(
    opening: &LevelSummary,
    before: Option<&LevelSummary>,
    after: &LevelSummary,
    closing: &LevelSummary,
) -> Result<(), SubmissionError> {
    if let Some(b) = before {
        if b.volume_l > opening.volume_l + VOLUME_EPSILON_L {
            return Err(SubmissionError::invalid(format!(
                "before-offload {:.2} L is above opening {:.2} L with no delivery recorded",
                b.volume_l, opening.volume_l
            )));
        }
        if after.volume_l <= b.volume_l {
            return Err(SubmissionError::invalid(format!(
                "after-offload {:.2} L must exceed before-offload {:.2} L",
                after.volume_l, b.volume_l
            )));
        }
    }
    if closing.volume_l > after.volume_l + VOLUME_EPSILON_L {
        return Err(SubmissionError::invalid(format!(
            "closing {:.2} L is above after-offload {:.2} L with no delivery recorded",
            closing.volume_l, after.volume_l
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

impl Draft {
    pub fn new(input: SubmissionInput) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    /// Run every check and calculation. Rejects before computing anything
    /// when an input is invalid; variance outcomes (including FAIL) are
    /// results, not errors.
    pub fn validate(self, ctx: &SubmissionContext<'_>) -> Result<Validated, SubmissionError> {
        let shift = self.input.shift_key();
        match self.run(&shift, ctx) {
            Ok(record) => {
                info!(
                    shift = %shift,
                    record_id = %record.record_id,
                    sequence = record.sequence,
                    status = record.validation_status.as_str(),
                    three_way = record.three_way.overall.as_str(),
                    advisories = record.advisories.len(),
                    "submission validated"
                );
                Ok(Validated { record })
            }
            Err(e) => {
                warn!(shift = %shift, error = %e, "submission rejected");
                Err(e)
            }
        }
    }

    fn run(
        self,
        shift: &ShiftKey,
        ctx: &SubmissionContext<'_>,
    ) -> Result<ReconciliationRecord, SubmissionError> {
        let input = self.input;
        let tank = ctx.tank;
        let thresholds = ctx.thresholds;
        let mut advisories: Vec<Advisory> = Vec::new();

        // 1) Authorization.
        if let Authorization::Denied { reason } = &ctx.authorization {
            return Err(SubmissionError::Unauthorized(reason.clone()));
        }

        // 2) Identity.
        if input.tank_id != tank.id {
            return Err(SubmissionError::invalid(format!(
                "submission for tank {} evaluated against tank {}",
                input.tank_id, tank.id
            )));
        }
        if input.submitted_by.trim().is_empty() {
            return Err(SubmissionError::invalid("submitted_by must not be empty"));
        }
        let previous = ctx.prior.previous_period;
        if let Some(prev) = previous {
            if prev.shift.tank_id != tank.id || prev.shift >= *shift {
                return Err(SubmissionError::invalid(format!(
                    "previous record {} does not precede {}",
                    prev.shift, shift
                )));
            }
        }
        let (sequence, supersedes) = match ctx.prior.superseded {
            Some(old) if old.shift != *shift => {
                return Err(SubmissionError::invalid(format!(
                    "cannot supersede record for {} with a submission for {}",
                    old.shift, shift
                )));
            }
            Some(old) => (old.sequence.saturating_add(1), Some(old.record_id)),
            None => (1, None),
        };

        // 3) Price and cash.
        let price_per_l = match input.price_per_l {
            Some(p) => p,
            None => ctx.prices.price_for(tank.fuel_type).ok_or_else(|| {
                SubmissionError::invalid(format!("no price configured for {}", tank.fuel_type))
            })?,
        };
        if !price_per_l.is_finite() || price_per_l <= 0.0 {
            return Err(SubmissionError::invalid(format!(
                "price per liter must be > 0 (got {price_per_l})"
            )));
        }
        if let Some(cash) = input.actual_cash {
            if !cash.is_finite() || cash < 0.0 {
                return Err(SubmissionError::invalid(format!(
                    "actual cash must be a non-negative number (got {cash})"
                )));
            }
        }

        // 4) Nozzles.
        check_nozzles(&input.nozzles)?;

        // 5) Levels.
        let closing = resolve_level(tank, input.closing, "closing")?;
        let opening = match input.opening {
            Some(level) => {
                let opening = resolve_level(tank, level, "opening")?;
                if let Some(prev) = previous {
                    let gap = opening.volume_l - prev.closing.volume_l;
                    if gap.abs() > thresholds.volume_tolerance_l {
                        advisories.push(Advisory::new(
                            AdvisoryCode::OpeningContinuity,
                            format!(
                                "opening {:.2} L differs from previous closing {:.2} L ({}) by {:+.2} L",
                                opening.volume_l, prev.closing.volume_l, prev.shift, gap
                            ),
                        ));
                    }
                }
                opening
            }
            None => {
                let prev = previous.ok_or_else(|| {
                    SubmissionError::invalid("opening level missing and no previous period record to seed it")
                })?;
                debug!(shift = %shift, from = %prev.shift, volume_l = prev.closing.volume_l, "opening seeded from previous closing");
                LevelSummary {
                    dip_cm: prev.closing.dip_cm,
                    volume_l: prev.closing.volume_l,
                    seeded_from_previous: true,
                }
            }
        };
        if let Some(msg) = low_fuel_advisory(tank, &closing, thresholds.low_fuel_percent) {
            advisories.push(Advisory::new(AdvisoryCode::LowFuel, msg));
        }

        // 6) Deliveries and timeline.
        let mut timeline: Option<Timeline> = None;
        let deliveries = match input.deliveries {
            DeliveryInput::None => {
                check_no_delivery_rise(&opening, &closing)?;
                DeliverySummary {
                    form: DeliveryForm::None,
                    before_offload: None,
                    after_offload: None,
                    deliveries: Vec::new(),
                    total_delivered_l: None,
                    issues: Vec::new(),
                }
            }
            DeliveryInput::Legacy {
                before_offload,
                after_offload,
            } => {
                let after = resolve_level(tank, after_offload, "after-offload")?;
                let before = before_offload
                    .map(|l| resolve_level(tank, l, "before-offload"))
                    .transpose()?;
                check_offload_sequence(&opening, before.as_ref(), &after, &closing)?;
                DeliverySummary {
                    form: DeliveryForm::Legacy,
                    before_offload: before,
                    after_offload: Some(after),
                    deliveries: Vec::new(),
                    total_delivered_l: before.map(|b| after.volume_l - b.volume_l),
                    issues: Vec::new(),
                }
            }
            DeliveryInput::Many { deliveries } if deliveries.is_empty() => {
                check_no_delivery_rise(&opening, &closing)?;
                DeliverySummary {
                    form: DeliveryForm::Many,
                    before_offload: None,
                    after_offload: None,
                    deliveries,
                    total_delivered_l: Some(0.0),
                    issues: Vec::new(),
                }
            }
            DeliveryInput::Many { deliveries } => {
                let window = TankWindow {
                    tank_id: tank.id.clone(),
                    capacity_l: tank.capacity_l,
                    opening_l: opening.volume_l,
                    closing_l: closing.volume_l,
                };
                let report = validate_deliveries(&window, &deliveries, thresholds);
                if report.reordered {
                    debug!(shift = %shift, "deliveries re-sorted chronologically");
                }
                if !report.is_valid() {
                    return Err(SubmissionError::InvalidDelivery {
                        issues: report.failures().cloned().collect(),
                    });
                }
                for issue in report.warnings() {
                    advisories.push(Advisory::new(AdvisoryCode::DeliveryWarning, issue.message.clone()));
                }

                // Rises ahead of a delivery become advisories;
                // closing above the last delivery is still rejected.
                let tl = reconstruct_timeline_with(
                    opening.volume_l,
                    closing.volume_l,
                    &report.deliveries,
                    InteriorRise::Warn,
                )?;
                for w in &tl.warnings {
                    advisories.push(Advisory::new(AdvisoryCode::TimelineMismatch, w.clone()));
                }
                timeline = Some(tl);

                DeliverySummary {
                    form: DeliveryForm::Many,
                    before_offload: None,
                    after_offload: None,
                    total_delivered_l: Some(report.total_delivered_l),
                    issues: report.issues,
                    deliveries: report.deliveries,
                }
            }
        };

        // 7) Movement.
        let volumes = match deliveries.form {
            DeliveryForm::None => DeliveryVolumes::None,
            DeliveryForm::Legacy => DeliveryVolumes::Legacy {
                before_offload_l: deliveries.before_offload.map(|l| l.volume_l),
                after_offload_l: deliveries
                    .after_offload
                    .map(|l| l.volume_l)
                    .unwrap_or_default(),
            },
            DeliveryForm::Many => DeliveryVolumes::Many(&deliveries.deliveries),
        };
        let movement = tank_movement(opening.volume_l, closing.volume_l, &volumes);
        debug!(
            shift = %shift,
            opening_l = opening.volume_l,
            closing_l = closing.volume_l,
            movement_l = movement.movement_l,
            formula = ?movement.formula,
            "tank movement"
        );
        if movement.incomplete {
            advisories.push(Advisory::new(
                AdvisoryCode::IncompleteData,
                "closing level is unset; movement recorded as 0 L",
            ));
        }

        // 8) Daily aggregation.
        let daily = aggregate(&DailyInput {
            fuel_type: tank.fuel_type,
            nozzles: &input.nozzles,
            tank_movement_l: movement.movement_l,
            price_per_l,
            actual_cash: input.actual_cash,
            allocations: &input.allocations,
            previous: previous.map(|p| &p.daily.cumulative),
        })?;
        if let Some(alloc) = &daily.allocation {
            if !alloc.balanced {
                advisories.push(Advisory::new(
                    AdvisoryCode::AllocationImbalance,
                    format!(
                        "customer allocations total {:.2} L against electronic {:.2} L (balance {:+.2} L)",
                        alloc.allocated_l, alloc.electronic_l, alloc.balance_l
                    ),
                ));
            }
        }

        // 9) Classification.
        let electronic_variance = classify_labeled(
            movement.movement_l,
            daily.totals.electronic_l,
            thresholds,
            VarianceLabels {
                reference: "tank movement",
                comparison: "electronic sales",
            },
        );
        let mechanical_variance = classify_labeled(
            movement.movement_l,
            daily.totals.mechanical_l,
            thresholds,
            VarianceLabels {
                reference: "tank movement",
                comparison: "mechanical sales",
            },
        );
        let validation_status = electronic_variance.status;
        debug!(
            shift = %shift,
            variance_l = electronic_variance.variance,
            status = validation_status.as_str(),
            "electronic variance classified"
        );

        // 10) Three-way.
        let three_way = analyze(
            &ThreeWayInput {
                tank_movement_l: movement.movement_l,
                electronic_total_l: daily.totals.electronic_l,
                mechanical_total_l: daily.totals.mechanical_l,
                actual_cash: input.actual_cash,
                price_per_l,
            },
            thresholds,
        );
        if three_way.nozzle_source == NozzleSource::Mechanical && daily.totals.mechanical_l != 0.0 {
            advisories.push(Advisory::new(
                AdvisoryCode::MechanicalFallback,
                "electronic total is zero; three-way analysis used mechanical totals",
            ));
        }

        for a in &advisories {
            warn!(shift = %shift, code = ?a.code, "{}", a.message);
        }

        let mut messages = vec![
            electronic_variance.message.clone(),
            mechanical_variance.message.clone(),
        ];
        messages.extend(three_way.messages.iter().cloned());
        messages.push(format!("three-way status: {}", three_way.overall.as_str()));
        messages.extend(advisories.iter().map(|a| a.message.clone()));

        Ok(ReconciliationRecord {
            record_id: record_id(shift, sequence),
            shift: shift.clone(),
            fuel_type: tank.fuel_type,
            submitted_by: input.submitted_by,
            sequence,
            supersedes,
            opening,
            closing,
            deliveries,
            movement,
            timeline,
            electronic_variance,
            mechanical_variance,
            validation_status,
            daily,
            three_way,
            messages,
            advisories,
            thresholds: *thresholds,
        })
    }
}
