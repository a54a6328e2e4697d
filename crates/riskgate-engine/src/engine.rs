//! Risk Scoring Engine
//!
//! Additive point system with a floor: start at [`BASE_SCORE`], add the
//! points of every fired rule, clamp to 0-100, then derive level and action.

use crate::input::RiskInput;
use crate::rules::{Rule, RULES};
use crate::verdict::{BreakdownEntry, RiskLevel, RiskOutput};
use riskgate_common::RiskScore;

/// Irreducible baseline risk of any attempt
pub const BASE_SCORE: i64 = 10;

/// Risk evaluation engine
///
/// Holds nothing but a reference to the static rule table, so it is `Copy`
/// and can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct RiskEngine {
    rules: &'static [Rule],
}

impl RiskEngine {
    /// Engine over the standard rule table
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Score one attempt
    pub fn evaluate(&self, input: &RiskInput) -> RiskOutput {
        let mut raw = BASE_SCORE;
        let mut breakdown = Vec::new();
        let mut factors = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.fires(input)) {
            raw += rule.points as i64;
            breakdown.push(BreakdownEntry {
                reason: rule.reason.to_string(),
                points: rule.points,
            });
            factors.push(rule.factor.to_string());
        }

        let score = RiskScore::clamped(raw);
        let level = RiskLevel::from_score(score);

        RiskOutput {
            score,
            level,
            action: level.action(),
            breakdown,
            factors,
        }
    }

    /// Rules this engine evaluates, in order
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Score one attempt with the standard rule table
pub fn score(input: &RiskInput) -> RiskOutput {
    RiskEngine::new().evaluate(input)
}
