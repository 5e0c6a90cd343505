//! Command handler modules for the `fsr` binary.
//!
//! Shared config and file helpers live here; command-specific logic lives in
//! the submodules.

pub mod dip;
pub mod reconcile;

use anyhow::{bail, Context, Result};
use fsr_config::{load_layered_yaml, report_unused_keys, LoadedConfig, UnusedKeyPolicy};
use serde::de::DeserializeOwned;
use std::fs;

/// Env var holding a comma-separated config path list, used when no
/// `--config` flag is given.
pub const ENV_CONFIG_PATHS: &str = "FSR_CONFIG";

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// `--config` paths, else `FSR_CONFIG`, else an error.
pub fn resolve_config_paths(flag_paths: Vec<String>) -> Result<Vec<String>> {
    if !flag_paths.is_empty() {
        return Ok(flag_paths);
    }
    let from_env: Vec<String> = std::env::var(ENV_CONFIG_PATHS)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if from_env.is_empty() {
        bail!("no config given: pass --config <path> (repeatable) or set {ENV_CONFIG_PATHS}");
    }
    Ok(from_env)
}

/// Load layered config and run the unused-key guard.
pub fn load_config(flag_paths: Vec<String>, policy: UnusedKeyPolicy) -> Result<LoadedConfig> {
    let paths = resolve_config_paths(flag_paths)?;
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;

    let report = report_unused_keys(&loaded.config_json, policy)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS unused_leaf_keys={}",
            report.unused_leaf_pointers.len()
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            eprintln!("  unused={}", p);
        }
        let extra = report.unused_leaf_pointers.len().saturating_sub(50);
        if extra > 0 {
            eprintln!("  ... and {} more", extra);
        }
    }
    Ok(loaded)
}

/// Read a JSON file, tolerating a UTF-8 BOM.
pub fn read_json<T: DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {what} failed: {path}"))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes).with_context(|| format!("{what} must be UTF-8 text"))?;
    serde_json::from_str(raw.trim()).with_context(|| format!("{what} must contain valid JSON: {path}"))
}

// ---------------------------------------------------------------------------
// thresholds
// ---------------------------------------------------------------------------

pub fn run_thresholds(config_paths: Vec<String>) -> Result<()> {
    let loaded = load_config(config_paths, UnusedKeyPolicy::Warn)?;
    let t = fsr_schemas::ThresholdConfig::from_config_json(&loaded.config_json)?;

    println!("config_hash={}", loaded.config_hash);
    println!("pass_percent={}", t.pass_percent);
    println!("warning_percent={}", t.warning_percent);
    println!("volume_tolerance_l={}", t.volume_tolerance_l);
    println!("volume_tolerance_percent={}", t.volume_tolerance_percent);
    println!("cash_tolerance={}", t.cash_tolerance);
    println!("cash_tolerance_percent={}", t.cash_tolerance_percent);
    println!("critical_percent={}", t.critical_percent);
    println!("low_fuel_percent={}", t.low_fuel_percent);
    println!("large_delivery_percent={}", t.large_delivery_percent);
    Ok(())
}
