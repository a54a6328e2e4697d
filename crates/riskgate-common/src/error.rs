//! Error types for RiskGate

use crate::value_objects::DomainError;
use thiserror::Error;

/// RiskGate error type
#[derive(Error, Debug)]
pub enum RiskGateError {
    /// Signal failed validation during normalization
    #[error("invalid signal: {0}")]
    InvalidSignal(String),

    /// Value object invariant violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for RiskGate
pub type RiskGateResult<T> = Result<T, RiskGateError>;
