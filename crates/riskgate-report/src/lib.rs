//! RiskGate Report - narrative briefings
//!
//! Turns session verdicts into prose through a pluggable [`Summarizer`].
//! Scoring never depends on this crate; [`ReportService`] always returns
//! text, falling back to fixed messages when the summarizer fails.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod service;

pub use error::ReportError;
pub use gemini::{GeminiConfig, GeminiSummarizer, DEFAULT_MODEL};
pub use service::{ReportService, Summarizer};
