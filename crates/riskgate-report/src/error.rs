use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("summarizer returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("missing API key")]
    MissingApiKey,
}
