//! Amplitude shift: scale the fluctuation around the mean.

use serde::{Deserialize, Serialize};

use tsag_core::{mean, Anomaly, Perturbation, Result};

use crate::validate;

/// Configuration for an amplitude shift.
///
/// `output[i] = mean + ratio * (template[i] - mean)`. A ratio below 1 damps
/// the signal, above 1 amplifies it, and 0 flattens it to its mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmplitudeShiftConfig {
    /// Factor applied to each sample's deviation from the mean. Finite, `>= 0`.
    pub ratio: f64,
}

impl Default for AmplitudeShiftConfig {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl AmplitudeShiftConfig {
    /// Create a config with the given ratio.
    #[must_use]
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl Perturbation for AmplitudeShiftConfig {
    fn kind(&self) -> &'static str {
        "amplitude_shift"
    }

    fn name(&self) -> &'static str {
        "AmplitudeShiftAnomaly"
    }

    fn validate(&self, _input_len: usize) -> Result<()> {
        validate::non_negative("ratio", self.ratio)
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        let m = mean(input);
        let (lo, hi) = validate::bounds(input);
        validate::finite_output(
            "ratio",
            self.ratio,
            [m + self.ratio * (lo - m), m + self.ratio * (hi - m)],
        )
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let m = mean(input);
        input.iter().map(|v| m + self.ratio * (v - m)).collect()
    }

    fn params(&self) -> String {
        format!("{{ratio: {}}}", self.ratio)
    }
}

/// Scales a template's deviation from its mean.
pub type AmplitudeShiftAnomaly = Anomaly<AmplitudeShiftConfig>;
