//! # tsag_core
//!
//! Core types and traits for tsag-rs time series anomaly generation.
//!
//! This crate provides:
//! - [`Template`], the immutable reference window anomalies are derived from
//! - [`Perturbation`] and [`AnomalyGenerator`], the contract every anomaly kind implements
//! - [`Anomaly`], the cached generator every concrete anomaly type aliases
//! - [`insert_segment`] and [`LabeledSeries`] for splicing anomalies into host series
//! - [`Seed`] and [`with_default_rng`] for deterministic random insertion
//! - Error types and the [`PlotSink`] seam
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsag_core::{AnomalyGenerator, Seed, Template};
//!
//! let template = Template::new(vec![0.0, 1.0, 0.0, -1.0])?;
//! let anomaly = RangeShiftAnomaly::new(template, RangeShiftConfig::new(0.5))?;
//! let mut rng = Seed::new(42).to_rng();
//! let labeled = anomaly.insert_labeled(&host, None, &mut rng)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod generator;
mod insert;
mod plot;
mod seed;
mod template;

pub use error::{AnomalyError, Result};
pub use generator::{Anomaly, AnomalyGenerator, GenerationState, Perturbation};
pub use insert::{insert_segment, random_start, LabeledSeries};
pub use plot::{NoopPlotter, PlotSink};
pub use seed::{with_default_rng, Seed, SEED_ENV_VAR};
pub use template::{mean, span, std_dev, Template};
