//! Error type of the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PisaError>;

/// Errors raised while reading PISA exports and writing tables.
#[derive(Error, Debug)]
pub enum PisaError {
    /// A file or directory could not be read or written
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The XML scanner hit unbalanced or unterminated markup
    #[error("Malformed XML at byte {offset}: {message}")]
    MalformedXml {
        /// Byte offset of the offending markup
        offset: usize,
        /// What went wrong
        message: String,
    },

    /// A leaf value could not be parsed as a number
    #[error("Invalid value for <{tag}>: {value:?}")]
    InvalidValue {
        /// Element name
        tag: String,
        /// Raw text of the element
        value: String,
    },

    /// A `STRUCTURE` label lacks a chain or residue number
    #[error("Invalid structure label {0:?}, expected something like 'A:LEU 12'")]
    InvalidStructure(String),

    /// A residue record lacks a required value
    #[error("Residue {structure} is missing <{tag}>")]
    MissingField {
        /// Label of the residue
        structure: String,
        /// Name of the missing element
        tag: String,
    },

    /// The `binder/target` chain groups could not be parsed
    #[error("Invalid chain groups {groups:?}: {reason}")]
    InvalidGroups {
        /// Groups as given
        groups: String,
        /// Why they were rejected
        reason: String,
    },

    /// The input root is not a directory
    #[error("Directory not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// Building or writing a DataFrame failed
    #[error("Table error: {0}")]
    Table(#[from] polars::error::PolarsError),

    /// Drawing the residue plot failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// The worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl PisaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PisaError::Io {
            path: path.into(),
            source,
        }
    }
}
