//! Error types for time-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Unknown timezone: '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid datetime format: '{raw}'")]
    UnparsableTimestamp {
        raw: String,
        tried: Vec<&'static str>,
    },

    #[error("Missing start time")]
    MissingStart,
}

pub type Result<T> = std::result::Result<T, TimeError>;
