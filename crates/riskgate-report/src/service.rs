//! Report service

use crate::error::ReportError;
use async_trait::async_trait;
use riskgate_events::Session;

pub const REPORT_UNAVAILABLE: &str = "Could not generate report.";
pub const REPORT_EMPTY: &str = "Report generation failed.";
pub const ANALYSIS_UNAVAILABLE: &str = "AI Analysis unavailable. Check network connection or API Key.";
pub const ANALYSIS_EMPTY: &str = "Analysis failed.";

/// Text generator behind the report service
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;
    async fn summarize(&self, sessions: &[Session]) -> Result<String, ReportError>;
    async fn analyze_session(&self, session: &Session) -> Result<String, ReportError>;
}

/// Caller-facing wrapper that always produces text
pub struct ReportService<S: Summarizer> {
    summarizer: S,
}

impl<S: Summarizer> ReportService<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer }
    }

    /// Executive briefing over `sessions`
    pub async fn security_report(&self, sessions: &[Session]) -> String {
        match self.summarizer.summarize(sessions).await {
            Ok(text) if text.trim().is_empty() => REPORT_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{} report failed: {}", self.summarizer.name(), e);
                REPORT_UNAVAILABLE.to_string()
            }
        }
    }

    pub async fn session_analysis(&self, session: &Session) -> String {
        match self.summarizer.analyze_session(session).await {
            Ok(text) if text.trim().is_empty() => ANALYSIS_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{} analysis of {} failed: {}", self.summarizer.name(), session.id, e);
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}
