//! Ledger errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("event not found: {0}")]
    EventNotFound(String),
}
