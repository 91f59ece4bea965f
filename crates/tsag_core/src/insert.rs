//! Splicing generated segments into host series.

use std::ops::Range;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// A host series with one anomalous window spliced in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    /// The augmented series. Same length as the host.
    pub series: Vec<f64>,
    /// First index of the anomalous window.
    pub start: usize,
    /// One past the last index of the anomalous window.
    pub end: usize,
}

impl LabeledSeries {
    /// The anomalous window as a range.
    #[must_use]
    pub fn window(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The inserted samples.
    #[must_use]
    pub fn anomaly(&self) -> &[f64] {
        &self.series[self.window()]
    }

    /// Per-sample labels, `true` inside the anomalous window.
    #[must_use]
    pub fn labels(&self) -> Vec<bool> {
        (0..self.series.len())
            .map(|i| self.window().contains(&i))
            .collect()
    }

    /// Drop the labels and keep the series.
    #[must_use]
    pub fn into_series(self) -> Vec<f64> {
        self.series
    }
}

/// Replace `host[index..index + segment.len()]` with `segment` in a copy of `host`.
///
/// # Errors
///
/// [`AnomalyError::IndexOutOfRange`] if the window does not fit in `host`.
pub fn insert_segment(host: &[f64], segment: &[f64], index: usize) -> Result<LabeledSeries> {
    let end = index
        .checked_add(segment.len())
        .filter(|&end| end <= host.len())
        .ok_or(AnomalyError::IndexOutOfRange {
            index,
            segment_len: segment.len(),
            host_len: host.len(),
        })?;

    let mut series = host.to_vec();
    series[index..end].copy_from_slice(segment);
    tracing::trace!(index, end, host_len = host.len(), "inserted anomaly segment");

    Ok(LabeledSeries {
        series,
        start: index,
        end,
    })
}

/// Draw a start index uniformly from `[0, host_len - segment_len]`.
///
/// # Errors
///
/// [`AnomalyError::HostTooShort`] if the segment cannot fit at all.
pub fn random_start(host_len: usize, segment_len: usize, rng: &mut dyn RngCore) -> Result<usize> {
    let last = host_len
        .checked_sub(segment_len)
        .ok_or(AnomalyError::HostTooShort {
            host_len,
            segment_len,
        })?;
    Ok(rng.gen_range(0..=last))
}
