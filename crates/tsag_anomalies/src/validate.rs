//! Parameter domain checks shared by the perturbations.

use tsag_core::{AnomalyError, Result};

pub(crate) fn finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AnomalyError::invalid_parameter(name, value, "must be finite"));
    }
    Ok(())
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(AnomalyError::invalid_parameter(name, value, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn positive(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(AnomalyError::invalid_parameter(name, value, "must be > 0"));
    }
    Ok(())
}

/// `value` in the half-open unit interval `(0, 1]`.
pub(crate) fn unit_ratio(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(AnomalyError::invalid_parameter(name, value, "must be in (0, 1]"));
    }
    Ok(())
}

/// Every value in `outputs` is finite; otherwise `name = value` is blamed.
pub(crate) fn finite_output(
    name: &str,
    value: impl std::fmt::Display,
    outputs: impl IntoIterator<Item = f64>,
) -> Result<()> {
    if outputs.into_iter().any(|v| !v.is_finite()) {
        return Err(AnomalyError::invalid_parameter(
            name,
            value,
            "overflows f64 on this template",
        ));
    }
    Ok(())
}

/// Smallest and largest sample.
pub(crate) fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
