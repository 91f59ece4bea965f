//! # tsag_anomalies
//!
//! Anomaly perturbations for time series templates.
//!
//! This crate provides:
//! - Point spikes ([`PointAnomaly`])
//! - Frequency, amplitude and range shifts ([`FrequencyShiftAnomaly`],
//!   [`AmplitudeShiftAnomaly`], [`RangeShiftAnomaly`])
//! - Seeded additive noise ([`NoisyAnomaly`])
//! - Chains of the above ([`CompoundAnomaly`])
//! - [`AnomalySpec`], a `kind`-tagged union of every configuration for JSON recipes
//!
//! ## Example
//!
//! ```rust
//! use tsag_anomalies::{AmplitudeShiftConfig, CompoundAnomaly, CompoundConfig, RangeShiftConfig};
//! use tsag_core::{AnomalyGenerator, Seed};
//!
//! let template = [0.0, 1.0, 0.0, -1.0];
//! let config = CompoundConfig::new()
//!     .then(AmplitudeShiftConfig::new(0.5))
//!     .then(RangeShiftConfig::new(1.0));
//! let anomaly = CompoundAnomaly::from_values(&template, config).unwrap();
//!
//! let host = vec![0.0; 16];
//! let mut rng = Seed::new(42).to_rng();
//! let labeled = anomaly.insert_labeled(&host, None, &mut rng).unwrap();
//! assert_eq!(labeled.series.len(), host.len());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod amplitude;
pub mod compound;
pub mod frequency;
pub mod noisy;
pub mod point;
pub mod range;
pub mod spec;
mod validate;

pub use amplitude::*;
pub use compound::*;
pub use frequency::*;
pub use noisy::*;
pub use point::*;
pub use range::*;
pub use spec::*;
