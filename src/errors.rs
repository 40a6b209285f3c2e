use std::result::Result as StdResult;

use thiserror::Error;

/// Validation failures raised by the scheduling core.
///
/// Every variant is a synchronous rejection of malformed input; none are transient.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
    #[error("Invalid period spec: {0}")]
    InvalidSpec(String),
    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = StdResult<T, ScheduleError>;
