//! The reference window every anomaly is derived from.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// An immutable, non-empty window of finite samples.
///
/// Cloning is cheap: the samples live behind an [`Arc`], so several
/// generators can share one template without copying it.
///
/// # Example
///
/// ```rust
/// use tsag_core::Template;
///
/// let template = Template::new(vec![0.0, 1.0, 0.0, -1.0]).unwrap();
/// assert_eq!(template.len(), 4);
/// assert_eq!(template.span(), 2.0);
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Template {
    values: Arc<[f64]>,
}

impl Template {
    /// Create a template, rejecting empty input and non-finite samples.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        validate_samples(&values)?;
        Ok(Self {
            values: values.into(),
        })
    }

    /// Number of samples. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The samples as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// Smallest sample.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest sample.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Range span, `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        span(&self.values)
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std(&self) -> f64 {
        std_dev(&self.values)
    }
}

impl Deref for Template {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl AsRef<[f64]> for Template {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Template {
    type Error = AnomalyError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Template {
    type Error = AnomalyError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }
}

impl From<Template> for Vec<f64> {
    fn from(template: Template) -> Self {
        template.values.to_vec()
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&&*self.values).finish()
    }
}

fn validate_samples(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(AnomalyError::EmptyTemplate);
    }
    if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnomalyError::invalid_parameter(
            format!("template[{i}]"),
            v,
            "template samples must be finite",
        ));
    }
    Ok(())
}

/// Arithmetic mean of a slice; `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `max - min` of a slice; `0.0` for an empty slice.
#[must_use]
pub fn span(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    hi - lo
}

/// Population standard deviation of a slice; `0.0` for an empty slice.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
