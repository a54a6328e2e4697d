//! Output formatting

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use riskgate_engine::{EnforcementAction, RiskLevel, RiskOutput};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` as JSON/YAML, or hand it to `table` for human output
    pub fn emit<T: Serialize>(&self, data: &T, table: impl FnOnce(&T)) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Table => table(data),
        }
        Ok(())
    }
}

pub fn level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => level.as_str().green(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::High => level.as_str().truecolor(255, 140, 0),
        RiskLevel::Critical => level.as_str().red().bold(),
    }
}

pub fn action(action: EnforcementAction) -> ColoredString {
    match action {
        EnforcementAction::Allowed => action.as_str().green(),
        EnforcementAction::MfaRequired => action.as_str().yellow(),
        EnforcementAction::Blocked => action.as_str().red().bold(),
    }
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Impact")]
    impact: String,
}

pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Human rendering of a verdict
pub fn print_verdict(out: &RiskOutput) {
    println!(
        "{} {}/100  {} {}  {} {}",
        "Score:".bold(),
        out.score,
        "Level:".bold(),
        level(out.level),
        "Action:".bold(),
        action(out.action)
    );
    if out.level.requires_monitoring() {
        println!("{}", "Allowed with monitoring".yellow());
    }

    if out.breakdown.is_empty() {
        println!("No risk factors fired.");
        return;
    }
    let rows = out.breakdown.iter().map(|b| BreakdownRow {
        reason: b.reason.clone(),
        impact: format!("+{}", b.points),
    });
    println!("{}", table(rows));
}
