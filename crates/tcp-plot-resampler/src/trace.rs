use serde::Serialize;
use std::path::PathBuf;
use tcp_plot_abstract::{GridSettings, Metric, ResampledSeries, SeriesKey, TimeSeries};

use crate::grid::TimeGrid;

/// Summary of one directory pass, written as `summary.json` on request.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub directory: PathBuf,
    pub grid: GridSummary,
    pub series: Vec<SeriesSummary>,
    pub skipped: Vec<SkippedMetric>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub key: String,
    pub samples: usize,
    pub first_time: Option<f64>,
    pub last_time: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Set once the chart has been written
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedMetric {
    pub metric: Metric,
    pub reason: String,
}

impl RunReport {
    pub fn new(directory: impl Into<PathBuf>, settings: &GridSettings, grid: &TimeGrid) -> Self {
        Self {
            directory: directory.into(),
            grid: GridSummary {
                start: settings.start,
                stop: settings.stop,
                step: settings.step,
                points: grid.len(),
            },
            series: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn skip(&mut self, metric: Metric, reason: impl Into<String>) {
        self.skipped.push(SkippedMetric {
            metric,
            reason: reason.into(),
        });
    }
}

impl SeriesSummary {
    pub fn new(key: &SeriesKey, source: &TimeSeries, resampled: &ResampledSeries) -> Self {
        let range = resampled.value_range();
        Self {
            key: key.to_string(),
            samples: source.len(),
            first_time: source.first().map(|s| s.time),
            last_time: source.last().map(|s| s.time),
            min: range.map(|(lo, _)| lo),
            max: range.map(|(_, hi)| hi),
            image: None,
        }
    }
}
