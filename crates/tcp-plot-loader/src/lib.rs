mod error;
pub mod lookup;
pub mod parse;

pub use error::{LoadError, ParseError};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tcp_plot_abstract::{Metric, SeriesKey, TimeSeries};
use tracing::{debug, error, warn};

/// Free-text run description drawn next to every chart.
pub const CONFIG_FILE_NAME: &str = "config.txt";

/// Annotation used when `config.txt` is absent or unreadable.
pub const CONFIG_PLACEHOLDER: &str = "No configuration available";

/// What happened to one metric during a directory pass.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricStatus {
    Loaded { series: usize },
    Missing,
    Failed { reason: String },
}

/// Every series found in one directory plus a per-metric outcome.
#[derive(Debug, Default)]
pub struct LoadedMetrics {
    pub series: BTreeMap<SeriesKey, TimeSeries>,
    pub statuses: Vec<(Metric, MetricStatus)>,
}

/// Builder for the loader. Allows narrowing the metric table.
pub struct LoaderBuilder {
    only: Option<Vec<Metric>>,
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderBuilder {
    pub fn new() -> Self {
        Self { only: None }
    }

    /// Restrict loading to `metrics`. Table order is kept regardless of argument order.
    pub fn only(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.only = Some(metrics.into_iter().collect());
        self
    }

    pub fn build(self) -> MetricLoader {
        let metrics = match self.only {
            Some(selected) => Metric::ALL
                .into_iter()
                .filter(|m| selected.contains(m))
                .collect(),
            None => Metric::ALL.to_vec(),
        };
        MetricLoader { metrics }
    }
}

/// Discovers and parses the metric files of a simulation output directory.
pub struct MetricLoader {
    metrics: Vec<Metric>,
}

impl Default for MetricLoader {
    fn default() -> Self {
        LoaderBuilder::new().build()
    }
}

impl MetricLoader {
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Load every configured metric from `dir`.
    ///
    /// Missing and malformed files are logged and skipped; they never abort
    /// the remaining metrics.
    pub fn load_dir(&self, dir: &Path) -> LoadedMetrics {
        let mut loaded = LoadedMetrics::default();

        for &metric in &self.metrics {
            let status = match self.load_metric(dir, metric) {
                Ok(None) => {
                    warn!("File {} not found, skipping {metric}", metric.file_name());
                    MetricStatus::Missing
                }
                Ok(Some(series)) => {
                    if series.is_empty() {
                        warn!("{} has no rows, no flows to plot", metric.file_name());
                    }
                    let count = series.len();
                    for (key, ts) in series {
                        debug!("Loaded {key}: {} samples", ts.len());
                        loaded.series.insert(key, ts);
                    }
                    MetricStatus::Loaded { series: count }
                }
                Err(err) => {
                    error!("Failed to process {}: {err}", metric.file_name());
                    MetricStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            loaded.statuses.push((metric, status));
        }

        loaded
    }

    /// Load a single metric. `Ok(None)` means the file does not exist.
    pub fn load_metric(
        &self,
        dir: &Path,
        metric: Metric,
    ) -> Result<Option<Vec<(SeriesKey, TimeSeries)>>, LoadError> {
        let path = dir.join(metric.file_name());
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        parse::parse_metric(metric, &contents)
            .map(Some)
            .map_err(|source| LoadError::Parse { path, source })
    }
}

/// Read `config.txt` verbatim, falling back to [`CONFIG_PLACEHOLDER`].
pub fn read_config_text(dir: &Path) -> String {
    let path = dir.join(CONFIG_FILE_NAME);
    match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            warn!("Could not read {}: {err}", path.display());
            CONFIG_PLACEHOLDER.to_string()
        }
    }
}
