use thiserror::Error;

use super::{ChartKind, ChartSeries};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The place the chart should be drawn into does not exist.
    #[error("render target '{}' for {} is missing", .0.target_id(), .0)]
    MissingTarget(ChartKind),

    #[error("rendering failed: {0}")]
    Backend(String),
}

/// Something that can draw a [`ChartSeries`].
///
/// A rendered chart stays alive until its handle is passed back to
/// [`RenderSink::dispose`]. Callers must dispose the previous handle for a
/// chart before rendering it again.
pub trait RenderSink {
    type Handle;

    fn render(
        &mut self,
        series: &ChartSeries,
    ) -> Result<Self::Handle, RenderError>;

    fn dispose(
        &mut self,
        handle: Self::Handle,
    );
}
