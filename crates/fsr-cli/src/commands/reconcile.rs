//! `fsr reconcile`: run one submission through the engine.

use anyhow::{Context, Result};
use fsr_config::{StationConfig, UnusedKeyPolicy};
use fsr_engine::{
    submit, Authorization, PriorRecords, ReconciliationRecord, SubmissionContext, SubmissionInput,
};
use std::fs;
use tracing::info;

use super::{load_config, read_json};

pub struct ReconcileArgs {
    pub config_paths: Vec<String>,
    pub input: String,
    pub previous: Option<String>,
    pub supersedes: Option<String>,
    pub out: Option<String>,
    pub strict: bool,
}

pub fn run_reconcile(args: ReconcileArgs) -> Result<()> {
    let policy = if args.strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let loaded = load_config(args.config_paths, policy)?;
    let station = StationConfig::from_loaded(&loaded)?;

    let input: SubmissionInput = read_json(&args.input, "submission")?;
    let previous: Option<ReconciliationRecord> = args
        .previous
        .as_deref()
        .map(|p| read_json(p, "previous record"))
        .transpose()?;
    let superseded: Option<ReconciliationRecord> = args
        .supersedes
        .as_deref()
        .map(|p| read_json(p, "superseded record"))
        .transpose()?;

    let tank = station.tanks.get(&input.tank_id)?;
    let shift = input.shift_key();

    // The operator running the binary is the submitting authority.
    let ctx = SubmissionContext {
        tank,
        thresholds: &station.thresholds,
        prices: &station.prices,
        prior: PriorRecords {
            previous_period: previous.as_ref(),
            superseded: superseded.as_ref(),
        },
        authorization: Authorization::Granted,
    };

    let record = submit(input, &ctx).with_context(|| format!("submission {shift} rejected"))?;

    if let Some(path) = args.out.as_deref() {
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(path, json).with_context(|| format!("write record failed: {path}"))?;
        info!(path, "record written");
    }

    println!("record_id={}", record.record_id);
    println!("shift={}", record.shift);
    println!("sequence={}", record.sequence);
    println!("config_hash={}", station.config_hash);
    println!("opening_l={:.2}", record.opening.volume_l);
    println!("closing_l={:.2}", record.closing.volume_l);
    println!("movement_l={:.2}", record.movement.movement_l);
    println!("electronic_l={:.2}", record.daily.totals.electronic_l);
    println!("mechanical_l={:.2}", record.daily.totals.mechanical_l);
    println!("validation_status={}", record.validation_status.as_str());
    println!("three_way={}", record.three_way.overall.as_str());
    for a in &record.advisories {
        println!("advisory={}", a.message);
    }
    Ok(())
}
