//! Seam for handing generated anomalies to an external plotting routine.

/// Receives a template and its anomalous variant for rendering.
pub trait PlotSink {
    /// Render `anomaly` next to the `template` it was derived from.
    fn plot(&mut self, title: &str, template: &[f64], anomaly: &[f64]);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlotter;

impl PlotSink for NoopPlotter {
    fn plot(&mut self, title: &str, template: &[f64], anomaly: &[f64]) {
        tracing::trace!(
            title,
            template_len = template.len(),
            anomaly_len = anomaly.len(),
            "plot requested without a plotting backend"
        );
    }
}
