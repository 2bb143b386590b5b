use thiserror::Error;

/// Errors raised by the permutation core and the example source.
///
/// An absent or malformed map at the "is a shuffle requested" decision point
/// is not an error; see [`crate::shuffle::shuffle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("invalid image dimension: {0}")]
    InvalidDimension(String),
    #[error("invalid shuffle map: {0}")]
    InvalidMap(String),
    #[error("granularity mismatch: log_panes={log_panes} log_dim={log_dim}")]
    GranularityMismatch { log_dim: i64, log_panes: i64 },
    #[error("label {label} out of range for {num_classes} classes")]
    InvalidLabel { label: usize, num_classes: usize },
    #[error("example source is empty")]
    EmptySource,
    #[error("truncated record {index}: expected {expected} bytes, got {got}")]
    Truncated {
        index: usize,
        expected: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, ShuffleError>;
