//! Rules command

use crate::output::{self, OutputFormat};
use riskgate_engine::{rules, Rule, BASE_SCORE};
use tabled::Tabled;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Reason")]
    reason: &'static str,
    #[tabled(rename = "Factor")]
    factor: &'static str,
}

pub fn handle(format: OutputFormat) -> anyhow::Result<()> {
    format.emit(&rules(), |rules: &&[Rule]| {
        let rows = rules.iter().enumerate().map(|(i, r)| RuleRow {
            index: i + 1,
            signal: r.signal.to_string(),
            points: format!("+{}", r.points),
            reason: r.reason,
            factor: r.factor,
        });
        println!("{}", output::table(rows));
        println!("Base score {}, clamped to 0-100.", BASE_SCORE);
    })
}
