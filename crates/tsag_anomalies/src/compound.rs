//! Compound anomalies: several perturbations chained over one template.

use serde::{Deserialize, Serialize};

use tsag_core::{Anomaly, AnomalyError, Perturbation, Result};

use crate::spec::AnomalySpec;

/// An ordered list of steps, each consuming the previous step's output.
///
/// ```rust
/// use tsag_anomalies::{
///     AmplitudeShiftConfig, CompoundAnomaly, CompoundConfig, FrequencyShiftConfig,
///     RangeShiftConfig,
/// };
/// use tsag_core::AnomalyGenerator;
///
/// let config = CompoundConfig::new()
///     .then(FrequencyShiftConfig::new(1.0 / 3.0))
///     .then(AmplitudeShiftConfig::new(1.0 / 3.0))
///     .then(RangeShiftConfig::new(0.5));
/// let anomaly = CompoundAnomaly::from_values(&[0.0, 1.0, 0.0, -1.0], config).unwrap();
/// assert_eq!(anomaly.generate().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompoundConfig {
    /// Steps, applied first to last.
    pub steps: Vec<AnomalySpec>,
}

impl CompoundConfig {
    /// Create an empty step list. At least one step must be added before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compound from an existing step list.
    #[must_use]
    pub fn from_steps(steps: Vec<AnomalySpec>) -> Self {
        Self { steps }
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: impl Into<AnomalySpec>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Append a step in place.
    pub fn push(&mut self, step: impl Into<AnomalySpec>) {
        self.steps.push(step.into());
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Perturbation for CompoundConfig {
    fn kind(&self) -> &'static str {
        "compound"
    }

    fn name(&self) -> &'static str {
        "CompoundAnomaly"
    }

    fn validate(&self, input_len: usize) -> Result<()> {
        if self.steps.is_empty() {
            return Err(AnomalyError::invalid_parameter(
                "steps",
                "[]",
                "a compound anomaly needs at least one step",
            ));
        }
        let mut len = input_len;
        for (i, step) in self.steps.iter().enumerate() {
            step.validate(len).map_err(|e| e.at_step(i, step.kind()))?;
            len = step.output_len(len);
        }
        Ok(())
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        let mut current = input.to_vec();
        for (i, step) in self.steps.iter().enumerate() {
            step.validate_values(&current)
                .map_err(|e| e.at_step(i, step.kind()))?;
            if i + 1 < self.steps.len() {
                current = step.apply(&current);
            }
        }
        Ok(())
    }

    fn output_len(&self, input_len: usize) -> usize {
        self.steps
            .iter()
            .fold(input_len, |len, step| step.output_len(len))
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        self.steps.iter().fold(input.to_vec(), |current, step| {
            let next = step.apply(&current);
            tracing::trace!(kind = step.kind(), len = next.len(), "applied compound step");
            next
        })
    }

    fn params(&self) -> String {
        let names: Vec<&str> = self.steps.iter().map(|step| step.name()).collect();
        format!("{names:?}")
    }
}

/// Applies a chain of perturbations to one template.
pub type CompoundAnomaly = Anomaly<CompoundConfig>;
