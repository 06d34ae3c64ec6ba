//! Simulation error type
//!
//! Every failure here is a caller bug (bad geometry handed to the kernel) or a
//! broken config file. Nothing in the kernel retries or recovers.

use thiserror::Error;

/// Errors raised by the simulation kernel
#[derive(Debug, Error)]
pub enum SimError {
    /// A vector-typed field or argument is not a usable vector (non-finite component)
    #[error("type mismatch: {0} is not a valid vector")]
    TypeMismatch(&'static str),

    /// A method received an argument it cannot work with
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Tuning or actor library JSON failed to parse
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
