use serde::Serialize;
use std::fmt;

/// Row shape of a metric file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `time value`
    TimeValue,
    /// `time flow_id value`, split into one series per flow
    TimeFlowValue,
}

/// Measurement channels written by a simulation run.
///
/// Declaration order is the order metrics are loaded, keyed and plotted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cwnd,
    Ssth,
    Rtt,
    Rto,
    Inflight,
    Throughput,
    Loss,
    Delay,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Cwnd,
        Metric::Ssth,
        Metric::Rtt,
        Metric::Rto,
        Metric::Inflight,
        Metric::Throughput,
        Metric::Loss,
        Metric::Delay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cwnd => "cwnd",
            Metric::Ssth => "ssth",
            Metric::Rtt => "rtt",
            Metric::Rto => "rto",
            Metric::Inflight => "inflight",
            Metric::Throughput => "throughput",
            Metric::Loss => "loss",
            Metric::Delay => "delay",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Metric::Cwnd => "cwnd.data",
            Metric::Ssth => "ssth.data",
            Metric::Rtt => "rtt.data",
            Metric::Rto => "rto.data",
            Metric::Inflight => "inflight.data",
            Metric::Throughput => "throughput.data",
            Metric::Loss => "loss.data",
            Metric::Delay => "delay.data",
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        match self {
            Metric::Throughput | Metric::Loss | Metric::Delay => ColumnLayout::TimeFlowValue,
            _ => ColumnLayout::TimeValue,
        }
    }

    /// Unit marker appended to the value field, stripped before parsing.
    pub fn unit_suffix(&self) -> Option<&'static str> {
        match self {
            Metric::Delay => Some("ns"),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_flow_metrics_use_three_columns() {
        let multi: Vec<_> = Metric::ALL
            .into_iter()
            .filter(|m| m.layout() == ColumnLayout::TimeFlowValue)
            .collect();
        assert_eq!(multi, vec![Metric::Throughput, Metric::Loss, Metric::Delay]);
    }

    #[test]
    fn only_delay_carries_a_unit_suffix() {
        for metric in Metric::ALL {
            let expected = if metric == Metric::Delay { Some("ns") } else { None };
            assert_eq!(metric.unit_suffix(), expected, "{metric}");
        }
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()), Some(metric));
            assert_eq!(metric.file_name(), format!("{}.data", metric.name()));
        }
        assert_eq!(Metric::from_name("jitter"), None);
    }
}
