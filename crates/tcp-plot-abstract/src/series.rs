use crate::metric::Metric;
use serde::Serialize;
use std::fmt;

/// A single `(time, value)` row from a metric file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Seconds since the start of the simulation
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Identifies one plotted series: a metric, plus the flow for multi-flow metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub metric: Metric,
    pub flow: Option<i64>,
}

impl SeriesKey {
    pub fn single(metric: Metric) -> Self {
        Self { metric, flow: None }
    }

    pub fn flow(metric: Metric, flow: i64) -> Self {
        Self {
            metric,
            flow: Some(flow),
        }
    }

    /// File name of the rendered chart, e.g. `cwnd.png` or `delay_1.png`.
    pub fn image_file_name(&self) -> String {
        format!("{self}.png")
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flow {
            Some(flow) => write!(f, "{}_{}", self.metric, flow),
            None => write!(f, "{}", self.metric),
        }
    }
}

/// Samples of one series with unique, strictly increasing timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Builds a cleaned series from raw rows in file order.
    ///
    /// Rows are stably sorted by time; where several rows share a timestamp
    /// only the one that came last in the file survives.
    pub fn from_samples(mut raw: Vec<Sample>) -> Self {
        raw.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut samples: Vec<Sample> = Vec::with_capacity(raw.len());
        for sample in raw {
            match samples.last_mut() {
                Some(last) if last.time == sample.time => *last = sample,
                _ => samples.push(sample),
            }
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

/// One value per grid timestamp. `None` only appears when the source series was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    values: Vec<Option<f64>>,
}

impl ResampledSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn all_missing(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Smallest and largest present value, ignoring NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
