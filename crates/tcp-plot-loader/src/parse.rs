use std::collections::BTreeMap;
use tcp_plot_abstract::{ColumnLayout, Metric, Sample, SeriesKey, TimeSeries};

use crate::error::ParseError;

/// Parse the full contents of one metric file into cleaned series.
///
/// Two-column metrics always yield exactly one series (possibly empty).
/// Three-column metrics yield one series per flow id, ordered by flow.
pub fn parse_metric(
    metric: Metric,
    contents: &str,
) -> Result<Vec<(SeriesKey, TimeSeries)>, ParseError> {
    match metric.layout() {
        ColumnLayout::TimeValue => {
            let mut samples = Vec::new();
            for (line, fields) in rows(contents) {
                let [time, value] = columns::<2>(line, &fields)?;
                samples.push(Sample::new(
                    parse_time(line, time)?,
                    parse_value(line, value, metric.unit_suffix())?,
                ));
            }
            Ok(vec![(
                SeriesKey::single(metric),
                TimeSeries::from_samples(samples),
            )])
        }
        ColumnLayout::TimeFlowValue => {
            let mut flows: BTreeMap<i64, Vec<Sample>> = BTreeMap::new();
            for (line, fields) in rows(contents) {
                let [time, flow, value] = columns::<3>(line, &fields)?;
                let sample = Sample::new(
                    parse_time(line, time)?,
                    parse_value(line, value, metric.unit_suffix())?,
                );
                flows.entry(parse_flow(line, flow)?).or_default().push(sample);
            }
            Ok(flows
                .into_iter()
                .map(|(flow, samples)| {
                    (SeriesKey::flow(metric, flow), TimeSeries::from_samples(samples))
                })
                .collect())
        }
    }
}

/// Non-blank lines split on whitespace, tagged with their 1-based line number.
fn rows(contents: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

fn columns<'a, const N: usize>(
    line: usize,
    fields: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(fields).map_err(|_| ParseError::ColumnCount {
        line,
        expected: N,
        found: fields.len(),
    })
}

fn parse_time(line: usize, text: &str) -> Result<f64, ParseError> {
    let time: f64 = text.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field: "time",
        text: text.to_string(),
    })?;
    if !time.is_finite() {
        return Err(ParseError::NonFiniteTime {
            line,
            text: text.to_string(),
        });
    }
    Ok(time)
}

fn parse_value(line: usize, text: &str, suffix: Option<&str>) -> Result<f64, ParseError> {
    let digits = match suffix {
        Some(suffix) => text.strip_suffix(suffix).unwrap_or(text),
        None => text,
    };
    digits.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field: "value",
        text: text.to_string(),
    })
}

fn parse_flow(line: usize, text: &str) -> Result<i64, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidFlow {
        line,
        text: text.to_string(),
    })
}
