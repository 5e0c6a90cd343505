use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification thresholds + tolerance bands.
///
/// All percentages are in percent units (0.5 = 0.5%). Passed into every
/// classification call; nothing in the workspace reads thresholds from
/// ambient state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Variance classifier: |variance| % at or below this is PASS.
    pub pass_percent: f64,
    /// Variance classifier: at or below this is WARNING, above is FAIL.
    pub warning_percent: f64,

    /// Three-way volume pairs: absolute band in liters.
    pub volume_tolerance_l: f64,
    /// Three-way volume pairs: percent band.
    pub volume_tolerance_percent: f64,
    /// Three-way cash pairs: absolute band in currency units.
    pub cash_tolerance: f64,
    /// Three-way cash pairs: percent band.
    pub cash_tolerance_percent: f64,
    /// Three-way: an out-of-tolerance pair above this percent is CRITICAL.
    pub critical_percent: f64,

    /// Low-fuel advisory below this percent of the chart's maximum dip.
    pub low_fuel_percent: f64,
    /// Large-delivery advisory above this percent of tank capacity.
    pub large_delivery_percent: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            pass_percent: 1.0,
            warning_percent: 2.0,
            volume_tolerance_l: 50.0,
            volume_tolerance_percent: 0.5,
            cash_tolerance: 500.0,
            cash_tolerance_percent: 0.5,
            critical_percent: 2.0,
            low_fuel_percent: 10.0,
            large_delivery_percent: 80.0,
        }
    }
}

impl ThresholdConfig {
    /// Reject bands that cannot be applied consistently.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pass_percent", self.pass_percent),
            ("warning_percent", self.warning_percent),
            ("volume_tolerance_l", self.volume_tolerance_l),
            ("volume_tolerance_percent", self.volume_tolerance_percent),
            ("cash_tolerance", self.cash_tolerance),
            ("cash_tolerance_percent", self.cash_tolerance_percent),
            ("critical_percent", self.critical_percent),
            ("low_fuel_percent", self.low_fuel_percent),
            ("large_delivery_percent", self.large_delivery_percent),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                bail!("thresholds.{name} must be a finite, non-negative number (got {v})");
            }
        }
        if self.pass_percent > self.warning_percent {
            bail!(
                "thresholds.pass_percent ({}) must not exceed thresholds.warning_percent ({})",
                self.pass_percent,
                self.warning_percent
            );
        }
        if self.critical_percent < self.volume_tolerance_percent
            || self.critical_percent < self.cash_tolerance_percent
        {
            bail!(
                "thresholds.critical_percent ({}) must be at least the volume/cash tolerance percents",
                self.critical_percent
            );
        }
        Ok(())
    }

    /// Build from canonical config JSON (produced by fsr-config).
    ///
    /// Every key under `/thresholds` is optional; absent keys keep the
    /// default. Values may be numbers or numeric strings.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut out = Self::default();
        let slots: [(&str, &mut f64); 9] = [
            ("pass_percent", &mut out.pass_percent),
            ("warning_percent", &mut out.warning_percent),
            ("volume_tolerance_l", &mut out.volume_tolerance_l),
            ("volume_tolerance_percent", &mut out.volume_tolerance_percent),
            ("cash_tolerance", &mut out.cash_tolerance),
            ("cash_tolerance_percent", &mut out.cash_tolerance_percent),
            ("critical_percent", &mut out.critical_percent),
            ("low_fuel_percent", &mut out.low_fuel_percent),
            ("large_delivery_percent", &mut out.large_delivery_percent),
        ];
        for (key, slot) in slots {
            let ptr = format!("/thresholds/{key}");
            if let Some(v) = cfg.pointer(&ptr) {
                *slot = number_from_value(v).with_context(|| format!("invalid thresholds.{key}"))?;
            }
        }
        out.validate()?;
        Ok(out)
    }
}

/// Accept JSON numbers and numeric strings (YAML authors quote things).
pub(crate) fn number_from_value(v: &Value) -> Result<f64> {
    match v {
        Value::Number(n) => n.as_f64().context("number not representable as f64"),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("not a number: '{s}'")),
        other => bail!("expected number, got {other}"),
    }
}
