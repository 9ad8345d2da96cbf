use std::io;
use std::path::Path;
use tracing::{error, info};

use crate::checklist::Checklist;
use crate::pipeline::Pipeline;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub already_done: usize,
    pub failed: usize,
}

/// Run `pipeline` over every directory in `lines`, skipping those the
/// checklist already lists. Successful directories are added to the
/// checklist; the caller decides when to save it.
///
/// A line that is not valid UTF-8 counts as failed and the batch moves on.
/// Any other read error ends the batch.
pub fn run_batch<I, S>(
    lines: I,
    checklist: &mut Checklist,
    pipeline: &Pipeline<'_>,
) -> BatchSummary
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut summary = BatchSummary::default();

    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                error!("Skipping unreadable input line: {err}");
                summary.failed += 1;
                continue;
            }
            Err(err) => {
                error!("Failed to read directory list: {err}");
                summary.failed += 1;
                break;
            }
        };
        let dir = line.as_ref().trim();
        if dir.is_empty() {
            continue;
        }
        if checklist.is_done(dir) {
            info!("Skipping {dir}: already processed");
            summary.already_done += 1;
            continue;
        }

        match pipeline.process(Path::new(dir)) {
            Ok(_) => {
                checklist.mark_done(dir);
                summary.processed += 1;
            }
            Err(err) => {
                error!("{err:#}");
                summary.failed += 1;
            }
        }
    }

    summary
}
