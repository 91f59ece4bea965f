//! Point anomalies: isolated spikes outside the template's usual spread.

use serde::{Deserialize, Serialize};

use tsag_core::{mean, std_dev, Anomaly, AnomalyError, Perturbation, Result};

use crate::validate;

/// Configuration for point anomalies.
///
/// `count` consecutive samples starting at `index` are pushed
/// `magnitude` standard deviations away from their value, alternating
/// between the upper and lower side (`+`, `-`, `+`, ...). For constant
/// templates, whose standard deviation is zero, a unit scale is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointConfig {
    /// First perturbed sample. `None` centres the spikes in the template.
    pub index: Option<usize>,
    /// Spike size in standard deviations. Finite, `> 0`.
    pub magnitude: f64,
    /// Number of consecutive spikes. At least 1.
    pub count: usize,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            index: None,
            magnitude: 3.0,
            count: 1,
        }
    }
}

impl PointConfig {
    /// Create a config with the given magnitude and a single centred spike.
    #[must_use]
    pub fn new(magnitude: f64) -> Self {
        Self {
            magnitude,
            ..Default::default()
        }
    }

    /// Place the first spike at `index`.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the number of spikes.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// First perturbed sample for a template of `len` samples.
    #[must_use]
    pub fn start(&self, len: usize) -> usize {
        self.index
            .unwrap_or_else(|| len.saturating_sub(self.count) / 2)
    }

    /// Absolute spike size for `input`.
    #[must_use]
    pub fn deviation(&self, input: &[f64]) -> f64 {
        let std = std_dev(input);
        // float error leaves a residue on constant inputs
        let scale = if std > 1e-12 * (1.0 + mean(input).abs()) {
            std
        } else {
            1.0
        };
        self.magnitude * scale
    }

    /// The perturbed values of the spiked samples, in order.
    fn spikes<'a>(&self, input: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        let deviation = self.deviation(input);
        let start = self.start(input.len());
        input[start..start + self.count]
            .iter()
            .enumerate()
            .map(move |(k, v)| if k % 2 == 0 { v + deviation } else { v - deviation })
    }
}

impl Perturbation for PointConfig {
    fn kind(&self) -> &'static str {
        "point"
    }

    fn name(&self) -> &'static str {
        "PointAnomaly"
    }

    fn validate(&self, input_len: usize) -> Result<()> {
        validate::positive("magnitude", self.magnitude)?;
        if self.count == 0 {
            return Err(AnomalyError::invalid_parameter("count", self.count, "must be >= 1"));
        }
        if let Some(index) = self.index {
            if index >= input_len {
                return Err(AnomalyError::invalid_parameter(
                    "index",
                    index,
                    format!("must be in [0, {}]", input_len.saturating_sub(1)),
                ));
            }
        }
        let start = self.start(input_len);
        if start.saturating_add(self.count) > input_len {
            return Err(AnomalyError::invalid_parameter(
                "count",
                self.count,
                format!("{} spikes from index {start} overrun a template of length {input_len}", self.count),
            ));
        }
        Ok(())
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        validate::finite_output("magnitude", self.magnitude, self.spikes(input))
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let start = self.start(input.len());
        let mut out = input.to_vec();
        for (v, spiked) in out[start..].iter_mut().zip(self.spikes(input)) {
            *v = spiked;
        }
        out
    }

    fn params(&self) -> String {
        let index = self
            .index
            .map_or_else(|| "centre".to_string(), |i| i.to_string());
        format!(
            "{{index: {index}, magnitude: {}, count: {}}}",
            self.magnitude, self.count
        )
    }
}

/// Spikes one or more samples of a template.
pub type PointAnomaly = Anomaly<PointConfig>;

#[cfg(test)]
mod tests {
    use super::*;
    use tsag_core::AnomalyGenerator;

    #[test]
    fn test_point_config_default() {
        let config = PointConfig::default();
        assert_eq!(config.index, None);
        assert_eq!(config.magnitude, 3.0);
        assert_eq!(config.count, 1);
    }

    #[test]
    fn test_single_spike_at_index() {
        // std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let template = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let a = PointAnomaly::from_values(&template, PointConfig::new(3.0).with_index(1)).unwrap();
        let out = a.generate();
        assert_eq!(out[1], 10.0);
        for i in (0..template.len()).filter(|&i| i != 1) {
            assert_eq!(out[i], template[i]);
        }
    }

    #[test]
    fn test_default_index_is_centre() {
        let a = PointAnomaly::from_values(&[0.0; 5], PointConfig::new(2.0)).unwrap();
        assert_eq!(a.generate(), &[0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_multiple_spikes_alternate_sides() {
        let a = PointAnomaly::from_values(&[1.0; 6], PointConfig::new(1.0).with_count(4)).unwrap();
        assert_eq!(a.generate(), &[1.0, 2.0, 0.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_single_sample_template_is_always_perturbed() {
        let a = PointAnomaly::from_values(&[5.0], PointConfig::default()).unwrap();
        assert_eq!(a.generate(), &[8.0]);
        let b = PointAnomaly::from_values(&[5.0], PointConfig::default().with_index(0)).unwrap();
        assert_eq!(b.generate(), &[8.0]);
    }

    #[test]
    fn test_index_out_of_template_rejected() {
        let err = PointAnomaly::from_values(&[1.0, 2.0, 3.0], PointConfig::default().with_index(3))
            .unwrap_err();
        assert_eq!(
            err,
            AnomalyError::invalid_parameter("index", 3, "must be in [0, 2]")
        );
    }

    #[test]
    fn test_count_overrun_rejected() {
        let config = PointConfig::default().with_index(2).with_count(2);
        assert!(PointAnomaly::from_values(&[1.0, 2.0, 3.0], config).is_err());
        let config = PointConfig::default().with_count(4);
        assert!(PointAnomaly::from_values(&[1.0, 2.0, 3.0], config).is_err());
    }

    #[test]
    fn test_bad_magnitude_and_count_rejected() {
        assert!(PointAnomaly::from_values(&[1.0], PointConfig::new(0.0)).is_err());
        assert!(PointAnomaly::from_values(&[1.0], PointConfig::new(f64::NAN)).is_err());
        assert!(PointAnomaly::from_values(&[1.0], PointConfig::default().with_count(0)).is_err());
    }

    #[test]
    fn test_overflowing_spike_rejected() {
        // std of [0, 4] is 2, so the spike itself overflows
        let err = PointAnomaly::from_values(&[0.0, 4.0], PointConfig::new(f64::MAX).with_index(1))
            .unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidParameter { ref name, .. } if name == "magnitude"));
        // spike fits, but the spiked sample does not
        let config = PointConfig::new(1.0).with_index(1);
        assert!(PointAnomaly::from_values(&[0.0, f64::MAX, 0.0], config.clone()).is_err());
        assert!(PointAnomaly::from_values(&[0.0, 1.0, 0.0], config).is_ok());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = serde_json::from_str::<PointConfig>(r#"{"magnitude": 2.0, "sigma": 1.0}"#);
        assert!(err.is_err());
        let config: PointConfig = serde_json::from_str(r#"{"index": 4}"#).unwrap();
        assert_eq!(config, PointConfig::default().with_index(4));
    }
}
