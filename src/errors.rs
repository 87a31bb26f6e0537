//! Error taxonomy: configuration problems vs. pipeline failures.

use std::path::PathBuf;
use thiserror::Error;

/// Errors in the caller-supplied options, detected before any data flows.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("unknown link mode: {0}")]
    UnknownMode(String),

    #[error("unknown column type: {0}")]
    UnknownType(String),

    #[error("malformed type declaration (expected name:type): {0}")]
    MalformedTypeSpec(String),

    #[error("column not found in header: {0}")]
    UnknownColumn(String),

    #[error("no {role} column configured and no default applies")]
    MissingColumn { role: &'static str },

    #[error("type list has {got} entries but header has {expected} columns")]
    TypeListTooLong { got: usize, expected: usize },
}

/// Errors that fail a pipeline run. Anomalies in the data itself
/// (short rows, unparseable cells, dangling references) are recovered
/// and never surface here.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("{0}")]
    Configuration(#[from] ConfigError),

    #[error("source not found: {path}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("cycle detected in hierarchy involving id: {0}")]
    CycleDetected(String),
}

pub type TableResult<T> = Result<T, TableError>;
