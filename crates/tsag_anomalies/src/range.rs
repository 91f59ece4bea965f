//! Range shift: a level shift proportional to the template's span.

use serde::{Deserialize, Serialize};

use tsag_core::{span, Anomaly, Perturbation, Result};

use crate::validate;

/// Configuration for a range (level) shift.
///
/// `output[i] = template[i] + ratio * (max - min)`. Negative ratios shift
/// downwards. Shape is untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeShiftConfig {
    /// Fraction of the template's span to add to every sample. Finite.
    pub ratio: f64,
}

impl Default for RangeShiftConfig {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl RangeShiftConfig {
    /// Create a config with the given ratio.
    #[must_use]
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl Perturbation for RangeShiftConfig {
    fn kind(&self) -> &'static str {
        "range_shift"
    }

    fn name(&self) -> &'static str {
        "RangeShiftAnomaly"
    }

    fn validate(&self, _input_len: usize) -> Result<()> {
        validate::finite("ratio", self.ratio)
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        let shift = self.ratio * span(input);
        let (lo, hi) = validate::bounds(input);
        validate::finite_output("ratio", self.ratio, [lo + shift, hi + shift])
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let shift = self.ratio * span(input);
        input.iter().map(|v| v + shift).collect()
    }

    fn params(&self) -> String {
        format!("{{ratio: {}}}", self.ratio)
    }
}

/// Shifts a template's level by a fraction of its span.
pub type RangeShiftAnomaly = Anomaly<RangeShiftConfig>;
