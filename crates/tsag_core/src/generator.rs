//! The anomaly generator contract and its cached implementation.

use std::fmt;
use std::sync::OnceLock;

use rand::RngCore;

use crate::error::Result;
use crate::insert::{insert_segment, random_start, LabeledSeries};
use crate::plot::PlotSink;
use crate::seed::with_default_rng;
use crate::template::Template;

/// A pure template-to-anomaly mapping together with its parameters.
///
/// Perturbations are the configuration half of a generator: they validate
/// themselves against an input length and map an input window to its
/// anomalous variant. They never touch randomness that is not fully
/// determined by their own fields, so [`Perturbation::apply`] is a pure
/// function.
///
/// # Implementation Notes
///
/// - `validate` must reject every configuration for which `apply` would
///   panic on finite input of that length
/// - `validate_values` must reject every configuration for which `apply`
///   would produce non-finite output on that particular input
/// - `output_len` must agree with the length `apply` actually returns
pub trait Perturbation: fmt::Debug + Send + Sync {
    /// Machine-readable kind, e.g. `"range_shift"`.
    fn kind(&self) -> &'static str;

    /// Display name, e.g. `"RangeShiftAnomaly"`.
    fn name(&self) -> &'static str;

    /// Check the parameters against an input of `input_len` samples.
    ///
    /// # Errors
    ///
    /// [`crate::AnomalyError::InvalidParameter`] (or, for compositions,
    /// [`crate::AnomalyError::StepComposition`]) when a parameter is out of
    /// its domain.
    fn validate(&self, input_len: usize) -> Result<()>;

    /// Check the parameters against the samples themselves.
    ///
    /// Only called with inputs whose length passed [`Perturbation::validate`].
    ///
    /// # Errors
    ///
    /// [`crate::AnomalyError::InvalidParameter`] when the output would
    /// overflow `f64` for this input.
    fn validate_values(&self, input: &[f64]) -> Result<()> {
        let _ = input;
        Ok(())
    }

    /// Length of the output for an input of `input_len` samples.
    fn output_len(&self, input_len: usize) -> usize {
        input_len
    }

    /// Produce the anomalous variant of `input`.
    ///
    /// Only called with inputs whose length passed [`Perturbation::validate`].
    fn apply(&self, input: &[f64]) -> Vec<f64>;

    /// Short parameter listing used in titles, e.g. `"{ratio: 0.5}"`.
    fn params(&self) -> String;
}

/// Lifecycle of a generator's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationState {
    /// Parameters validated, nothing generated yet.
    Constructed,
    /// Output computed and cached.
    Generated,
}

/// Anything that can produce an anomalous segment and splice it into a host.
///
/// # Example
///
/// ```rust,ignore
/// use tsag_core::{AnomalyGenerator, Seed};
///
/// let anomaly = RangeShiftAnomaly::from_values(&template, RangeShiftConfig::new(0.5))?;
/// let mut rng = Seed::new(42).to_rng();
/// let augmented = anomaly.insert_with_rng(&host, None, &mut rng)?;
/// ```
pub trait AnomalyGenerator: Send + Sync {
    /// The template this generator was built from.
    fn template(&self) -> &Template;

    /// The anomalous sequence, computed on first call and cached.
    fn generate(&self) -> &[f64];

    /// Whether the output has been computed yet.
    fn state(&self) -> GenerationState;

    /// Display name of the anomaly kind.
    fn name(&self) -> &str;

    /// Title in the form `"Name - {params}"`.
    fn describe(&self) -> String;

    /// Splice the generated segment into a copy of `host`.
    ///
    /// With `index = None` the start is drawn from the process default
    /// generator (see [`crate::with_default_rng`]).
    ///
    /// # Errors
    ///
    /// [`crate::AnomalyError::IndexOutOfRange`] for an explicit index that does
    /// not fit, [`crate::AnomalyError::HostTooShort`] when no index fits.
    fn insert(&self, host: &[f64], index: Option<usize>) -> Result<Vec<f64>> {
        let segment = self.generate();
        let start = match index {
            Some(start) => start,
            None => with_default_rng(|rng| random_start(host.len(), segment.len(), rng))?,
        };
        insert_segment(host, segment, start).map(LabeledSeries::into_series)
    }

    /// Like [`AnomalyGenerator::insert`], drawing a random start from `rng`.
    fn insert_with_rng(
        &self,
        host: &[f64],
        index: Option<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        self.insert_labeled(host, index, rng)
            .map(LabeledSeries::into_series)
    }

    /// Like [`AnomalyGenerator::insert_with_rng`], keeping the anomaly window.
    fn insert_labeled(
        &self,
        host: &[f64],
        index: Option<usize>,
        rng: &mut dyn RngCore,
    ) -> Result<LabeledSeries> {
        let segment = self.generate();
        let start = match index {
            Some(start) => start,
            None => random_start(host.len(), segment.len(), rng)?,
        };
        insert_segment(host, segment, start)
    }

    /// Hand the template and generated sequence to `sink`.
    fn plot(&self, sink: &mut dyn PlotSink) {
        sink.plot(&self.describe(), self.template(), self.generate());
    }
}

/// A [`Perturbation`] bound to a [`Template`], with its output cached.
///
/// Every concrete anomaly type is an alias of this struct, e.g.
/// `type RangeShiftAnomaly = Anomaly<RangeShiftConfig>`.
#[derive(Debug, Clone)]
pub struct Anomaly<P: Perturbation> {
    template: Template,
    perturbation: P,
    generated: OnceLock<Vec<f64>>,
}

impl<P: Perturbation> Anomaly<P> {
    /// Bind `perturbation` to `template`, validating it eagerly.
    ///
    /// # Errors
    ///
    /// Whatever [`Perturbation::validate`] reports for this template length,
    /// then whatever [`Perturbation::validate_values`] reports for its samples.
    pub fn new(template: Template, perturbation: P) -> Result<Self> {
        perturbation.validate(template.len())?;
        perturbation.validate_values(&template)?;
        tracing::debug!(
            kind = perturbation.kind(),
            template_len = template.len(),
            "constructed anomaly generator"
        );
        Ok(Self {
            template,
            perturbation,
            generated: OnceLock::new(),
        })
    }

    /// Build a template from `values` and bind `perturbation` to it.
    ///
    /// # Errors
    ///
    /// [`crate::AnomalyError::EmptyTemplate`] for an empty slice, otherwise as
    /// [`Anomaly::new`].
    pub fn from_values(values: &[f64], perturbation: P) -> Result<Self> {
        Self::new(Template::try_from(values)?, perturbation)
    }

    /// The validated parameters.
    #[must_use]
    pub fn config(&self) -> &P {
        &self.perturbation
    }

    /// Take the generated sequence, computing it if needed.
    #[must_use]
    pub fn into_generated(self) -> Vec<f64> {
        let Self {
            template,
            perturbation,
            generated,
        } = self;
        generated
            .into_inner()
            .unwrap_or_else(|| perturbation.apply(&template))
    }
}

impl<P: Perturbation> AnomalyGenerator for Anomaly<P> {
    fn template(&self) -> &Template {
        &self.template
    }

    fn generate(&self) -> &[f64] {
        self.generated.get_or_init(|| {
            let out = self.perturbation.apply(&self.template);
            debug_assert_eq!(out.len(), self.perturbation.output_len(self.template.len()));
            tracing::debug!(
                kind = self.perturbation.kind(),
                len = out.len(),
                "generated anomaly"
            );
            out
        })
    }

    fn state(&self) -> GenerationState {
        if self.generated.get().is_some() {
            GenerationState::Generated
        } else {
            GenerationState::Constructed
        }
    }

    fn name(&self) -> &str {
        self.perturbation.name()
    }

    fn describe(&self) -> String {
        format!("{} - {}", self.perturbation.name(), self.perturbation.params())
    }
}

impl<P: Perturbation> fmt::Display for Anomaly<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
