//! Normalization errors

use riskgate_common::RiskGateError;
use thiserror::Error;

/// Telemetry that violates the input contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid measurement {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("{field} must be within 0.0-1.0, got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("inconsistent counts: {0}")]
    InconsistentCounts(String),

    #[error("invalid baseline: {0}")]
    InvalidBaseline(String),
}

impl From<SignalError> for RiskGateError {
    fn from(err: SignalError) -> Self {
        RiskGateError::InvalidSignal(err.to_string())
    }
}
