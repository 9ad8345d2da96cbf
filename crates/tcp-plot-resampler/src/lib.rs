pub mod engine;
pub mod grid;
pub mod trace;

pub use engine::{resample, resample_all};
pub use grid::{GridError, MAX_POINTS, TimeGrid};
pub use trace::{GridSummary, RunReport, SeriesSummary, SkippedMetric};
