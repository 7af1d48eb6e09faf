use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems reading a single field from the console.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid number for {field}: '{input}'")]
    InvalidNumber { field: &'static str, input: String },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl InputError {
    pub fn invalid_number(field: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            input: input.into(),
        }
    }

    /// Whether re-prompting can fix this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, InputError::Io(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid faculty record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: InputError,
    },
}

impl ConfigError {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// A broken structural property of the sorted index, reported by
/// [`AvlTree::check_invariants`](crate::avl::AvlTree::check_invariants).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("key {key} is out of order")]
    Order { key: String },

    #[error("cached height of key {key} is {cached}, actual {actual}")]
    Height {
        key: String,
        cached: usize,
        actual: usize,
    },

    #[error("balance factor of key {key} is {factor}")]
    Balance { key: String, factor: isize },
}
