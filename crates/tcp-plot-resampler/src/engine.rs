use std::collections::BTreeMap;
use tcp_plot_abstract::{ResampledSeries, SeriesKey, TimeSeries};
use tracing::debug;

use crate::grid::TimeGrid;

/// Project `series` onto `grid` with last-known-value semantics.
///
/// Each grid point takes the value of the latest sample at or before it.
/// Grid points ahead of the first sample take the first sample's value.
/// An empty series yields `None` at every grid point.
pub fn resample(series: &TimeSeries, grid: &TimeGrid) -> ResampledSeries {
    let samples = series.samples();
    let Some(first) = samples.first() else {
        return ResampledSeries::all_missing(grid.len());
    };

    // Both sequences are sorted, so a single cursor walks the samples once.
    let mut cursor = 0;
    let mut current = first.value;
    let values = grid
        .points()
        .iter()
        .map(|&t| {
            while cursor < samples.len() && samples[cursor].time <= t {
                current = samples[cursor].value;
                cursor += 1;
            }
            Some(current)
        })
        .collect();

    ResampledSeries::new(values)
}

/// Resample every series against the same grid. Key order is preserved.
pub fn resample_all(
    series: &BTreeMap<SeriesKey, TimeSeries>,
    grid: &TimeGrid,
) -> BTreeMap<SeriesKey, ResampledSeries> {
    series
        .iter()
        .map(|(key, ts)| {
            debug!("Resampling {key} ({} samples onto {} points)", ts.len(), grid.len());
            (*key, resample(ts, grid))
        })
        .collect()
}
