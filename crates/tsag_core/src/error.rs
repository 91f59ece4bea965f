//! Error types for tsag_core.

use thiserror::Error;

/// Result type alias using [`AnomalyError`].
pub type Result<T> = std::result::Result<T, AnomalyError>;

/// Errors raised while building or applying anomaly generators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    /// A parameter lies outside the domain its perturbation declares.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Offending value, rendered for display.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A zero-length template was supplied.
    #[error("Template is empty")]
    EmptyTemplate,

    /// An explicit insertion index places the segment outside the host.
    #[error(
        "Insertion index {index} out of range: segment of length {segment_len} \
         does not fit in host of length {host_len}"
    )]
    IndexOutOfRange {
        /// The requested start index.
        index: usize,
        /// Length of the generated segment.
        segment_len: usize,
        /// Length of the host series.
        host_len: usize,
    },

    /// The host series is shorter than the generated segment.
    #[error("Host series of length {host_len} is shorter than segment of length {segment_len}")]
    HostTooShort {
        /// Length of the host series.
        host_len: usize,
        /// Length of the generated segment.
        segment_len: usize,
    },

    /// A step of a compound anomaly failed.
    #[error("Compound step {step} ({kind}) failed: {source}")]
    StepComposition {
        /// Zero-based position of the failing step.
        step: usize,
        /// Kind of the failing step.
        kind: String,
        /// The underlying error.
        #[source]
        source: Box<AnomalyError>,
    },
}

impl AnomalyError {
    /// Creates an [`AnomalyError::InvalidParameter`].
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Wraps `self` as the failure of compound step `step`.
    pub fn at_step(self, step: usize, kind: impl Into<String>) -> Self {
        Self::StepComposition {
            step,
            kind: kind.into(),
            source: Box::new(self),
        }
    }

    /// Follows nested [`AnomalyError::StepComposition`] wrappers to the root cause.
    #[must_use]
    pub fn root_cause(&self) -> &AnomalyError {
        match self {
            Self::StepComposition { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
