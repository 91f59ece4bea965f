//! # tsag
//!
//! Synthetic labeled anomalies for time series.
//!
//! Labeled anomalous data is scarce. tsag-rs takes a clean template window,
//! perturbs it into a specific anomaly class, and splices the result back
//! into a longer host series, keeping track of where the anomaly sits:
//!
//! - **Point**: isolated spikes a few standard deviations out
//! - **Frequency shift**: the same pattern replayed faster
//! - **Amplitude shift**: fluctuation damped or amplified around the mean
//! - **Range shift**: a level shift proportional to the template's span
//! - **Noisy**: seeded additive Gaussian noise
//! - **Compound**: any ordered chain of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use tsag::prelude::*;
//!
//! let template = Template::new(vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]).unwrap();
//! let config = CompoundConfig::new()
//!     .then(FrequencyShiftConfig::new(1.0 / 3.0))
//!     .then(AmplitudeShiftConfig::new(1.0 / 3.0))
//!     .then(RangeShiftConfig::new(0.5));
//! let anomaly = CompoundAnomaly::new(template, config).unwrap();
//!
//! let host: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
//! let mut rng = Seed::new(42).to_rng();
//! let labeled = anomaly.insert_labeled(&host, None, &mut rng).unwrap();
//!
//! assert_eq!(labeled.series.len(), host.len());
//! assert_eq!(labeled.anomaly(), anomaly.generate());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub use tsag_anomalies as anomalies;
pub use tsag_core as core;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tsag::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tsag_core::{
        Anomaly, AnomalyError, AnomalyGenerator, GenerationState, LabeledSeries, NoopPlotter,
        Perturbation, PlotSink, Result, Seed, Template,
    };

    // Anomalies
    pub use tsag_anomalies::{
        AmplitudeShiftAnomaly, AmplitudeShiftConfig, AnomalySpec, CompoundAnomaly,
        CompoundConfig, FrequencyShiftAnomaly, FrequencyShiftConfig, Interpolation,
        NoisyAnomaly, NoisyConfig, PointAnomaly, PointConfig, RangeShiftAnomaly,
        RangeShiftConfig,
    };
}
