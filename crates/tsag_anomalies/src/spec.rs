//! A serializable description of any anomaly kind.

use serde::{Deserialize, Serialize};

use tsag_core::{Anomaly, Perturbation, Result, Template};

use crate::amplitude::AmplitudeShiftConfig;
use crate::compound::CompoundConfig;
use crate::frequency::FrequencyShiftConfig;
use crate::noisy::NoisyConfig;
use crate::point::PointConfig;
use crate::range::RangeShiftConfig;

/// Any anomaly configuration, tagged by `kind`.
///
/// This is the unit of a compound step list and of anomaly recipes read
/// from JSON:
///
/// ```rust
/// use tsag_anomalies::{AnomalySpec, RangeShiftConfig};
///
/// let spec: AnomalySpec = serde_json::from_str(r#"{"kind": "range_shift", "ratio": 0.5}"#).unwrap();
/// assert_eq!(spec, AnomalySpec::RangeShift(RangeShiftConfig::new(0.5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalySpec {
    /// See [`PointConfig`].
    Point(PointConfig),
    /// See [`FrequencyShiftConfig`].
    FrequencyShift(FrequencyShiftConfig),
    /// See [`AmplitudeShiftConfig`].
    AmplitudeShift(AmplitudeShiftConfig),
    /// See [`RangeShiftConfig`].
    RangeShift(RangeShiftConfig),
    /// See [`NoisyConfig`].
    Noisy(NoisyConfig),
    /// See [`CompoundConfig`].
    Compound(CompoundConfig),
}

impl AnomalySpec {
    /// Every kind name accepted in the `kind` tag.
    pub const KINDS: [&'static str; 6] = [
        "point",
        "frequency_shift",
        "amplitude_shift",
        "range_shift",
        "noisy",
        "compound",
    ];

    /// Default configuration for `kind`, or `None` if the kind is unknown.
    #[must_use]
    pub fn default_for(kind: &str) -> Option<Self> {
        let spec = match kind {
            "point" => Self::Point(PointConfig::default()),
            "frequency_shift" => Self::FrequencyShift(FrequencyShiftConfig::default()),
            "amplitude_shift" => Self::AmplitudeShift(AmplitudeShiftConfig::default()),
            "range_shift" => Self::RangeShift(RangeShiftConfig::default()),
            "noisy" => Self::Noisy(NoisyConfig::default()),
            "compound" => Self::Compound(CompoundConfig::default()),
            _ => return None,
        };
        Some(spec)
    }

    /// Bind this configuration to `template`.
    ///
    /// The result is an [`Anomaly`], which can be boxed as a
    /// `Box<dyn AnomalyGenerator>` when kinds are mixed.
    ///
    /// # Errors
    ///
    /// Whatever the underlying configuration reports for this template.
    pub fn build(self, template: Template) -> Result<Anomaly<Self>> {
        Anomaly::new(template, self)
    }

    fn inner(&self) -> &dyn Perturbation {
        match self {
            Self::Point(c) => c,
            Self::FrequencyShift(c) => c,
            Self::AmplitudeShift(c) => c,
            Self::RangeShift(c) => c,
            Self::Noisy(c) => c,
            Self::Compound(c) => c,
        }
    }
}

impl Perturbation for AnomalySpec {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn validate(&self, input_len: usize) -> Result<()> {
        self.inner().validate(input_len)
    }

    fn validate_values(&self, input: &[f64]) -> Result<()> {
        self.inner().validate_values(input)
    }

    fn output_len(&self, input_len: usize) -> usize {
        self.inner().output_len(input_len)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        self.inner().apply(input)
    }

    fn params(&self) -> String {
        self.inner().params()
    }
}

macro_rules! impl_from_config {
    ($($config:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$config> for AnomalySpec {
                fn from(config: $config) -> Self {
                    Self::$variant(config)
                }
            }
        )*
    };
}

impl_from_config! {
    PointConfig => Point,
    FrequencyShiftConfig => FrequencyShift,
    AmplitudeShiftConfig => AmplitudeShift,
    RangeShiftConfig => RangeShift,
    NoisyConfig => Noisy,
    CompoundConfig => Compound,
}
