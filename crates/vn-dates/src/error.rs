//! Error types for vn-dates operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VnDatesError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid facts: {0}")]
    InvalidFacts(String),
}

pub type Result<T> = std::result::Result<T, VnDatesError>;
