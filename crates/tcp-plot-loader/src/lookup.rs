use anyhow::Result;
use tcp_plot_abstract::Metric;

/// Map a user-visible metric name to the metric table entry.
pub fn metric_by_name(name: &str) -> Result<Metric> {
    match Metric::from_name(name) {
        Some(metric) => Ok(metric),
        None => {
            let known: Vec<_> = Metric::ALL.iter().map(Metric::name).collect();
            anyhow::bail!("Unknown metric '{name}'. Try one of: {}.", known.join(", "))
        }
    }
}
