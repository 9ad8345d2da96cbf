use anyhow::{Context, Result};
use plotters::prelude::*;
use std::ops::Range;
use tcp_plot_abstract::{PlotSettings, ResampledSeries};
use tracing::info;

use crate::palette::series_color;
use crate::{RenderRequest, SeriesRenderer};

/// Share of the canvas width given to the chart; the rest holds the annotation.
const CHART_SHARE: f64 = 0.78;

/// Renders each series to a PNG with a side panel showing the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    settings: PlotSettings,
}

impl PngRenderer {
    pub fn new(settings: PlotSettings) -> Self {
        Self { settings }
    }

    fn draw(&self, request: &RenderRequest<'_>) -> Result<()> {
        let (width, height) = (self.settings.width, self.settings.height);
        let caption_size = (height / 30).max(12);
        let label_size = (height / 50).max(10);
        let note_size = (height / 60).max(9);
        let key = request.key.to_string();
        let color = series_color(request.index);

        let root = BitMapBackend::new(request.output, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let chart_width = (f64::from(width) * CHART_SHARE) as u32;
        let (chart_area, note_area) = root.split_horizontally(chart_width);

        let mut chart = ChartBuilder::on(&chart_area)
            .caption(format!("Metric: {key}"), ("sans-serif", caption_size))
            .margin(label_size)
            .x_label_area_size(label_size * 3)
            .y_label_area_size(label_size * 5)
            .build_cartesian_2d(x_range(request.grid.points()), y_range(request.series))?;

        chart
            .configure_mesh()
            .x_desc("Time (seconds)")
            .y_desc(key.as_str())
            .label_style(("sans-serif", label_size))
            .axis_desc_style(("sans-serif", label_size))
            .light_line_style(BLACK.mix(0.08))
            .bold_line_style(BLACK.mix(0.2))
            .draw()?;

        let points = request
            .grid
            .points()
            .iter()
            .zip(request.series.values())
            .filter_map(|(&t, &v)| v.map(|v| (t, v)));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(3)))?
            .label(key.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(3))
            });

        chart
            .configure_series_labels()
            .label_font(("sans-serif", label_size))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        let line_height = (note_size as f64 * 1.4) as i32;
        let top = caption_size as i32 + label_size as i32;
        for (row, line) in request.annotation.iter().enumerate() {
            note_area.draw(&Text::new(
                line.as_str(),
                (label_size as i32, top + row as i32 * line_height),
                ("monospace", note_size).into_font(),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

impl SeriesRenderer for PngRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<()> {
        self.draw(request)
            .with_context(|| format!("Failed to render {}", request.output.display()))?;
        info!("Created chart: {}", request.output.display());
        Ok(())
    }
}

/// Horizontal extent of the grid; a single point gets a unit-wide window.
pub fn x_range(points: &[f64]) -> Range<f64> {
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) if last > first => first..last,
        (Some(&first), _) => first..first + 1.0,
        _ => 0.0..1.0,
    }
}

/// Vertical extent padded by 5%; flat and empty series still get a visible band.
pub fn y_range(series: &ResampledSeries) -> Range<f64> {
    match series.value_range() {
        None => 0.0..1.0,
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            lo - pad..hi + pad
        }
        Some((value, _)) => {
            let pad = if value == 0.0 { 1.0 } else { value.abs() * 0.05 };
            value - pad..value + pad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcp_plot_abstract::{Metric, SeriesKey};
    use tcp_plot_resampler::TimeGrid;
    use tempfile::TempDir;

    #[test]
    fn y_range_pads_both_ends() {
        let series = ResampledSeries::new(vec![Some(0.0), Some(10.0), Some(5.0)]);
        assert_eq!(y_range(&series), -0.5..10.5);
    }

    #[test]
    fn flat_series_gets_a_band() {
        let flat = ResampledSeries::new(vec![Some(200.0); 4]);
        assert_eq!(y_range(&flat), 190.0..210.0);

        let zero = ResampledSeries::new(vec![Some(0.0); 4]);
        assert_eq!(y_range(&zero), -1.0..1.0);
    }

    #[test]
    fn missing_series_uses_unit_range() {
        assert_eq!(y_range(&ResampledSeries::all_missing(3)), 0.0..1.0);
    }

    #[test]
    fn x_range_spans_grid() {
        assert_eq!(x_range(&[0.0, 0.5, 1.0]), 0.0..1.0);
        assert_eq!(x_range(&[2.0]), 2.0..3.0);
        assert_eq!(x_range(&[]), 0.0..1.0);
    }

    #[test]
    fn writes_png_for_partial_series() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("cwnd.png");
        let grid = TimeGrid::new(0.0, 1.0, 0.25).unwrap();
        let series = ResampledSeries::new(vec![None, Some(10.0), Some(10.0), Some(20.0)]);
        let key = SeriesKey::single(Metric::Cwnd);
        let annotation = vec!["TcpBbr".to_string(), "bottleneck 10Mbps".to_string()];
        let request = RenderRequest {
            key: &key,
            index: 0,
            grid: &grid,
            series: &series,
            annotation: &annotation,
            output: &output,
        };
        let renderer = PngRenderer::new(PlotSettings {
            width: 320,
            height: 240,
            wrap_width: 20,
        });

        match renderer.render(&request) {
            Ok(()) => {
                let size = std::fs::metadata(&output).unwrap().len();
                assert!(size > 0);
            }
            // Headless hosts may ship without any system fonts.
            Err(err) if format!("{err:#}").to_lowercase().contains("font") => {
                eprintln!("skipping chart render: {err:#}");
            }
            Err(err) => panic!("render failed: {err:#}"),
        }
    }
}
