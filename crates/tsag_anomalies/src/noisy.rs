//! Additive Gaussian noise, reproducible through an explicit seed.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use tsag_core::{Anomaly, Perturbation, Result, Seed};

use crate::validate;

/// Configuration for a noisy anomaly.
///
/// Noise is drawn from a ChaCha8 stream seeded with `seed`, so generation
/// stays a pure function of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoisyConfig {
    /// Noise mean. Finite.
    pub mu: f64,
    /// Noise standard deviation. Finite, `>= 0`.
    pub sigma: f64,
    /// Seed of the noise stream.
    pub seed: Seed,
}

impl Default for NoisyConfig {
    fn default() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
            seed: Seed::default(),
        }
    }
}

impl NoisyConfig {
    /// Create a config with the given noise distribution.
    #[must_use]
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self {
            mu,
            sigma,
            ..Default::default()
        }
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }
}

impl Perturbation for NoisyConfig {
    fn kind(&self) -> &'static str {
        "noisy"
    }

    fn name(&self) -> &'static str {
        "NoisyAnomaly"
    }

    fn validate(&self, _input_len: usize) -> Result<()> {
        validate::finite("mu", self.mu)?;
        validate::non_negative("sigma", self.sigma)
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        let (lo, hi) = validate::bounds(input);
        validate::finite_output("mu", self.mu, [lo + self.mu, hi + self.mu])?;
        validate::finite_output("sigma", self.sigma, self.apply(input))
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut rng = self.seed.to_rng();
        input
            .iter()
            .map(|v| {
                let z: f64 = rng.sample(StandardNormal);
                v + self.mu + self.sigma * z
            })
            .collect()
    }

    fn params(&self) -> String {
        format!(
            "{{mu: {}, sigma: {}, seed: {}}}",
            self.mu,
            self.sigma,
            self.seed.value()
        )
    }
}

/// Adds seeded Gaussian noise to a template.
pub type NoisyAnomaly = Anomaly<NoisyConfig>;
