use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Directories already handled by earlier batch runs, one path per line.
#[derive(Debug)]
pub struct Checklist {
    path: PathBuf,
    entries: Vec<String>,
    done: HashSet<String>,
}

impl Checklist {
    /// Read the checklist at `path`. A missing file is an empty checklist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut checklist = Self {
            path,
            entries: Vec::new(),
            done: HashSet::new(),
        };
        if !checklist.path.exists() {
            return Ok(checklist);
        }

        let content = fs::read_to_string(&checklist.path)
            .with_context(|| format!("Failed to read checklist {}", checklist.path.display()))?;
        for line in content.lines() {
            checklist.mark_done(line);
        }
        Ok(checklist)
    }

    pub fn is_done(&self, dir: &str) -> bool {
        self.done.contains(dir.trim())
    }

    pub fn mark_done(&mut self, dir: &str) {
        let dir = dir.trim();
        if dir.is_empty() || self.done.contains(dir) {
            return;
        }
        self.done.insert(dir.to_string());
        self.entries.push(dir.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Rewrite the file with every entry, in the order they were recorded.
    pub fn save(&self) -> Result<()> {
        let mut content = self.entries.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write checklist {}", self.path.display()))
    }
}
