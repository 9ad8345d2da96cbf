use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A row that could not be turned into a sample. Lines are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid {field} '{text}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        text: String,
    },
    #[error("line {line}: invalid flow id '{text}'")]
    InvalidFlow { line: usize, text: String },
    #[error("line {line}: time must be finite, got '{text}'")]
    NonFiniteTime { line: usize, text: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
