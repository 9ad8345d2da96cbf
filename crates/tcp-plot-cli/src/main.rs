use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tcp_plot_cli::{Checklist, Pipeline, load_settings, run_batch};
use tcp_plot_loader::MetricLoader;
use tcp_plot_loader::lookup::metric_by_name;
use tcp_plot_render::PngRenderer;
use tcp_plot_resampler::TimeGrid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot TCP simulation metrics on a common time grid")]
struct Args {
    /// Simulation output directory containing the *.data files.
    #[arg(required_unless_present = "batch", conflicts_with = "batch")]
    dir: Option<PathBuf>,

    /// Read directories from stdin, one per line.
    #[arg(long, default_value_t = false)]
    batch: bool,

    /// Directories already processed in batch mode.
    #[arg(long, default_value = "processed.txt")]
    checklist: PathBuf,

    /// TOML file overriding grid and chart settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Only plot the named metric (repeatable), e.g. --metric cwnd --metric rtt.
    #[arg(long = "metric", value_name = "NAME")]
    metrics: Vec<String>,

    /// Write plots/summary.json next to the charts.
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    info!("tcp-plot starting…");

    let settings = load_settings(args.settings.as_deref())?;
    let grid = TimeGrid::from_settings(&settings.grid).context("Invalid grid settings")?;
    info!(
        "Time grid: {} points from {} s, step {} s",
        grid.len(),
        settings.grid.start,
        settings.grid.step
    );

    let loader = args.build_loader()?;
    let renderer = PngRenderer::new(settings.plot);
    let pipeline = Pipeline::new(loader, settings, grid, &renderer).write_summary(args.summary);

    if args.batch {
        let mut checklist = Checklist::load(&args.checklist)?;
        let stdin = io::stdin();
        let summary = run_batch(stdin.lock().lines(), &mut checklist, &pipeline);
        checklist.save()?;
        info!(
            "Batch complete: {} processed, {} already done, {} failed",
            summary.processed, summary.already_done, summary.failed
        );
    } else if let Some(dir) = &args.dir {
        if let Err(err) = pipeline.process(dir) {
            error!("{err:#}");
        }
    }

    info!("Processing complete");
    Ok(())
}

impl Args {
    fn build_loader(&self) -> Result<MetricLoader> {
        if self.metrics.is_empty() {
            return Ok(MetricLoader::default());
        }
        let selected = self
            .metrics
            .iter()
            .map(|name| metric_by_name(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(MetricLoader::builder().only(selected).build())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
