use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tcp_plot_abstract::Settings;
use tcp_plot_loader::{MetricLoader, MetricStatus, read_config_text};
use tcp_plot_render::{RenderRequest, SeriesRenderer, wrap_text};
use tcp_plot_resampler::{RunReport, SeriesSummary, TimeGrid, resample_all};
use tracing::{error, info};

/// Subdirectory of the input directory that receives the charts.
pub const PLOTS_DIR: &str = "plots";

pub const SUMMARY_FILE: &str = "summary.json";

/// Load → resample → render for one simulation output directory at a time.
pub struct Pipeline<'a> {
    loader: MetricLoader,
    settings: Settings,
    grid: TimeGrid,
    renderer: &'a dyn SeriesRenderer,
    write_summary: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        loader: MetricLoader,
        settings: Settings,
        grid: TimeGrid,
        renderer: &'a dyn SeriesRenderer,
    ) -> Self {
        Self {
            loader,
            settings,
            grid,
            renderer,
            write_summary: false,
        }
    }

    /// Also write `plots/summary.json` for every directory.
    pub fn write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    /// Process one directory.
    ///
    /// Only a missing directory or an unwritable output location fail the
    /// whole pass; per-metric and per-chart problems are logged and skipped.
    pub fn process(&self, dir: &Path) -> Result<RunReport> {
        if !dir.is_dir() {
            anyhow::bail!("Data directory not found: {}", dir.display());
        }
        info!("Processing {}", dir.display());

        let plots_dir = dir.join(PLOTS_DIR);
        fs::create_dir_all(&plots_dir)
            .with_context(|| format!("Failed to create {}", plots_dir.display()))?;

        let loaded = self.loader.load_dir(dir);
        let mut report = RunReport::new(dir, &self.settings.grid, &self.grid);
        for (metric, status) in &loaded.statuses {
            match status {
                MetricStatus::Loaded { .. } => {}
                MetricStatus::Missing => report.skip(*metric, "file not found"),
                MetricStatus::Failed { reason } => report.skip(*metric, reason.clone()),
            }
        }

        let config = read_config_text(dir);
        let annotation = wrap_text(&config, self.settings.plot.wrap_width);

        let resampled = resample_all(&loaded.series, &self.grid);
        for (index, (key, series)) in resampled.iter().enumerate() {
            let mut summary = SeriesSummary::new(key, &loaded.series[key], series);
            let output = plots_dir.join(key.image_file_name());
            let request = RenderRequest {
                key,
                index,
                grid: &self.grid,
                series,
                annotation: &annotation,
                output: &output,
            };
            match self.renderer.render(&request) {
                Ok(()) => summary.image = Some(output),
                Err(err) => error!("Chart for {key} not written: {err:#}"),
            }
            report.series.push(summary);
        }

        if self.write_summary {
            write_report(&plots_dir.join(SUMMARY_FILE), &report)?;
        }

        info!(
            "Finished {}: {} charts, {} metrics skipped",
            dir.display(),
            report.series.iter().filter(|s| s.image.is_some()).count(),
            report.skipped.len()
        );
        Ok(report)
    }
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize run summary")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write summary file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use tcp_plot_abstract::Metric;
    use tempfile::TempDir;

    /// Records what would have been drawn instead of writing images.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub calls: RefCell<Vec<Rendered>>,
        pub fail_on: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct Rendered {
        pub key: String,
        pub index: usize,
        pub values: Vec<Option<f64>>,
        pub annotation: Vec<String>,
        pub output: std::path::PathBuf,
    }

    impl SeriesRenderer for RecordingRenderer {
        fn render(&self, request: &RenderRequest<'_>) -> Result<()> {
            let key = request.key.to_string();
            if self.fail_on.as_deref() == Some(key.as_str()) {
                anyhow::bail!("backend refused {key}");
            }
            self.calls.borrow_mut().push(Rendered {
                key,
                index: request.index,
                values: request.series.values().to_vec(),
                annotation: request.annotation.to_vec(),
                output: request.output.to_path_buf(),
            });
            Ok(())
        }
    }

    pub(crate) fn small_pipeline(renderer: &RecordingRenderer) -> Pipeline<'_> {
        let mut settings = Settings::default();
        settings.grid.stop = 0.4;
        settings.grid.step = 0.1;
        settings.plot.wrap_width = 20;
        let grid = TimeGrid::from_points(vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        Pipeline::new(MetricLoader::default(), settings, grid, renderer)
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn renders_one_chart_per_series() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cwnd.data", "0.05 10\n0.25 20\n");
        write(dir.path(), "throughput.data", "0.0 0 5\n0.0 1 7\n0.2 0 9\n");
        write(dir.path(), "config.txt", "TcpBbr bottleneck 10Mbps with forward error correction\n");

        let renderer = RecordingRenderer::default();
        let report = small_pipeline(&renderer).process(dir.path()).unwrap();

        let calls = renderer.calls.borrow();
        let keys: Vec<_> = calls.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["cwnd", "throughput_0", "throughput_1"]);
        assert_eq!(calls[0].values, vec![Some(10.0), Some(10.0), Some(10.0), Some(20.0)]);
        assert_eq!(calls[1].values, vec![Some(5.0), Some(5.0), Some(9.0), Some(9.0)]);
        assert_eq!(calls[2].values, vec![Some(7.0); 4]);
        assert_eq!(
            calls.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(calls[1].output, dir.path().join("plots").join("throughput_0.png"));
        assert!(calls[0].annotation.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(
            calls[0].annotation.join(" "),
            "TcpBbr bottleneck 10Mbps with forward error correction"
        );

        assert!(dir.path().join(PLOTS_DIR).is_dir());
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.skipped.len(), Metric::ALL.len() - 2);
        assert!(!dir.path().join(PLOTS_DIR).join(SUMMARY_FILE).exists());
    }

    #[test]
    fn empty_metric_file_renders_all_missing_series() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ssth.data", "");

        let renderer = RecordingRenderer::default();
        small_pipeline(&renderer).process(dir.path()).unwrap();

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].key, "ssth");
        assert_eq!(calls[0].values, vec![None; 4]);
        assert_eq!(calls[0].annotation.join(" "), tcp_plot_loader::CONFIG_PLACEHOLDER);
    }

    #[test]
    fn malformed_metric_is_skipped_and_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rtt.data", "0.0 0.04\n0.1\n");
        write(dir.path(), "rto.data", "0.0 1.0\n");
        write(dir.path(), "delay.data", "0.1 0 250ns\n");

        let renderer = RecordingRenderer::default();
        let report = small_pipeline(&renderer).process(dir.path()).unwrap();

        let keys: Vec<_> = renderer.calls.borrow().iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec!["rto", "delay_0"]);
        assert_eq!(renderer.calls.borrow()[1].values, vec![Some(250.0); 4]);
        let rtt = report.skipped.iter().find(|s| s.metric == Metric::Rtt).unwrap();
        assert!(rtt.reason.contains("line 2"), "{}", rtt.reason);
    }

    #[test]
    fn render_failure_does_not_stop_other_series() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cwnd.data", "0.0 1\n");
        write(dir.path(), "inflight.data", "0.0 2\n");

        let renderer = RecordingRenderer {
            fail_on: Some("cwnd".into()),
            ..Default::default()
        };
        let report = small_pipeline(&renderer).process(dir.path()).unwrap();

        assert_eq!(renderer.calls.borrow().len(), 1);
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].image, None);
        assert!(report.series[1].image.is_some());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let renderer = RecordingRenderer::default();
        let missing = dir.path().join("no-such-run");

        let err = small_pipeline(&renderer).process(&missing).unwrap_err();
        assert!(err.to_string().contains("no-such-run"));
        assert!(!missing.exists());
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn summary_file_is_written_on_request() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rtt.data", "0.1 0.05\n");

        let renderer = RecordingRenderer::default();
        small_pipeline(&renderer)
            .write_summary(true)
            .process(dir.path())
            .unwrap();

        let raw = fs::read_to_string(dir.path().join(PLOTS_DIR).join(SUMMARY_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["grid"]["points"], 4);
        assert_eq!(json["series"][0]["key"], "rtt");
        assert_eq!(json["series"][0]["samples"], 1);
    }

    #[test]
    fn existing_plots_directory_is_reused() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(PLOTS_DIR)).unwrap();
        write(dir.path(), "cwnd.data", "0.0 1\n");

        let renderer = RecordingRenderer::default();
        assert!(small_pipeline(&renderer).process(dir.path()).is_ok());
        assert_eq!(renderer.calls.borrow().len(), 1);
    }
}
