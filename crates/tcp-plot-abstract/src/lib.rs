pub mod config;
pub mod metric;
pub mod series;

pub use config::{GridSettings, PlotSettings, Settings, SettingsOverride};
pub use metric::{ColumnLayout, Metric};
pub use series::{ResampledSeries, Sample, SeriesKey, TimeSeries};
