//! Report command

use super::read_document;
use crate::output::{self, OutputFormat};
use colored::Colorize;
use riskgate_events::{ActivityLedger, DashboardStats, SecurityEvent, Session};
use riskgate_report::{GeminiConfig, GeminiSummarizer, ReportService};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

#[derive(Debug, Serialize)]
pub struct Report {
    pub stats: DashboardStats,
    pub risky_sessions: Vec<Session>,
    pub briefing: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analyses: Vec<SessionAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct SessionAnalysis {
    pub session_id: String,
    pub email: String,
    pub analysis: String,
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "User")]
    email: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Factors")]
    factors: String,
}

pub async fn handle(
    events: &Path,
    analyze: usize,
    api_key: Option<String>,
    model: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let events: Vec<SecurityEvent> = read_document(events)?;
    let ledger = load_ledger(events);

    if api_key.is_none() {
        eprintln!(
            "{} no API key set (use --api-key, RISKGATE_API_KEY or `riskgate config set api_key`)",
            "warning:".yellow().bold()
        );
    }
    let mut config = GeminiConfig { api_key: api_key.unwrap_or_default(), ..Default::default() };
    if let Some(model) = model {
        config.model = model;
    }
    let service = ReportService::new(GeminiSummarizer::new(config));

    let sessions = ledger.sessions();
    let briefing = service.security_report(&sessions).await;

    let risky = ledger.risky_sessions();

    let mut analyses = Vec::new();
    for session in risky.iter().take(analyze) {
        analyses.push(SessionAnalysis {
            session_id: session.id.clone(),
            email: session.user.email.clone(),
            analysis: service.session_analysis(session).await,
        });
    }

    let report = Report { stats: ledger.stats(), risky_sessions: risky, briefing, analyses };
    format.emit(&report, print_report)
}

/// Replay recorded events oldest first
fn load_ledger(mut events: Vec<SecurityEvent>) -> ActivityLedger {
    events.sort_by_key(|e| e.timestamp);
    let ledger = ActivityLedger::with_capacity(events.len());
    for event in events {
        ledger.record(event);
    }
    ledger
}

fn print_report(report: &Report) {
    let s = &report.stats;
    println!("{}", "Activity".bold());
    println!(
        "  logins {}  active sessions {}  high risk {}  blocked {}  locked {}  avg score {:.1}",
        s.total_logins,
        s.active_sessions,
        s.high_risk_logins,
        s.blocked_attacks,
        s.accounts_locked,
        s.avg_risk_score
    );

    if !report.risky_sessions.is_empty() {
        let rows = report.risky_sessions.iter().map(|s| SessionRow {
            email: s.user.email.clone(),
            location: s.location.clone(),
            score: s.risk_score.value(),
            status: s.status.to_string(),
            factors: s.risk_factors.join(", "),
        });
        println!("{}", output::table(rows));
    }

    println!("\n{}\n{}", "Briefing".bold(), report.briefing);
    for a in &report.analyses {
        println!("\n{} {}\n{}", "Session".bold(), a.email, a.analysis);
    }
}
