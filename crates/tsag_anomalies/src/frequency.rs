//! Frequency shift: replay the template faster over the same window.
//!
//! The template is treated as one period of a cyclic signal and resampled
//! at a step of `1 / ratio` samples, wrapping around its end. With
//! `ratio = 1/k` every k-th sample is kept and the pattern is tiled back to
//! the original length, so the window shows `k` times as many cycles.

use serde::{Deserialize, Serialize};

use tsag_core::{Anomaly, AnomalyError, Perturbation, Result};

use crate::validate;

/// How fractional source positions are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Blend the two neighbouring samples.
    #[default]
    Linear,
    /// Take the closest sample.
    Nearest,
}

/// Configuration for a frequency shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrequencyShiftConfig {
    /// Inverse speed-up factor, in `(0, 1]`. `1` is the identity.
    pub ratio: f64,
    /// Rule for reading between samples.
    pub interpolation: Interpolation,
}

impl Default for FrequencyShiftConfig {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            interpolation: Interpolation::Linear,
        }
    }
}

impl FrequencyShiftConfig {
    /// Create a config with the given ratio and linear interpolation.
    #[must_use]
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            ..Default::default()
        }
    }

    /// Set the interpolation rule.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Perturbation for FrequencyShiftConfig {
    fn kind(&self) -> &'static str {
        "frequency_shift"
    }

    fn name(&self) -> &'static str {
        "FrequencyShiftAnomaly"
    }

    fn validate(&self, input_len: usize) -> Result<()> {
        validate::unit_ratio("ratio", self.ratio)?;
        let last = input_len.saturating_sub(1) as f64;
        if !(last / self.ratio).is_finite() {
            return Err(AnomalyError::invalid_parameter(
                "ratio",
                self.ratio,
                format!("too small to resample {input_len} samples"),
            ));
        }
        Ok(())
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let period = n as f64;
        (0..n)
            .map(|i| {
                let pos = (i as f64 / self.ratio).rem_euclid(period);
                match self.interpolation {
                    Interpolation::Linear => {
                        let lo = pos.floor();
                        let frac = pos - lo;
                        // rem_euclid can round up to exactly `period`
                        let lo = (lo as usize) % n;
                        let hi = (lo + 1) % n;
                        input[lo] * (1.0 - frac) + input[hi] * frac
                    }
                    Interpolation::Nearest => input[(pos.round() as usize) % n],
                }
            })
            .collect()
    }

    fn params(&self) -> String {
        format!(
            "{{ratio: {}, interpolation: {:?}}}",
            self.ratio, self.interpolation
        )
    }
}

/// Compresses a template's oscillation into the same window.
pub type FrequencyShiftAnomaly = Anomaly<FrequencyShiftConfig>;
