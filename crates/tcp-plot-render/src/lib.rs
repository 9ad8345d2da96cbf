pub mod chart;
pub mod palette;
pub mod wrap;

pub use chart::PngRenderer;
pub use wrap::wrap_text;

use anyhow::Result;
use std::path::Path;
use tcp_plot_abstract::{ResampledSeries, SeriesKey};
use tcp_plot_resampler::TimeGrid;

/// Everything needed to draw one series.
pub struct RenderRequest<'a> {
    pub key: &'a SeriesKey,
    /// Position of the series within its directory, used to pick a colour
    pub index: usize,
    pub grid: &'a TimeGrid,
    pub series: &'a ResampledSeries,
    /// Configuration text, already wrapped
    pub annotation: &'a [String],
    pub output: &'a Path,
}

/// Draws a resampled series to an image file.
pub trait SeriesRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<()>;
}
