pub mod batch;
pub mod checklist;
pub mod pipeline;
pub mod settings;

pub use batch::{BatchSummary, run_batch};
pub use checklist::Checklist;
pub use pipeline::{PLOTS_DIR, Pipeline, SUMMARY_FILE};
pub use settings::load_settings;
