//! Rule table
//!
//! Declarative list of `(condition, points, reason, factor)` entries,
//! evaluated in order by the engine. Rules never interact: each one fires
//! or not on its own condition.

use crate::input::{RiskInput, Signal};
use serde::Serialize;

/// One scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Condition that fires the rule
    pub signal: Signal,
    /// Points added when the rule fires
    pub points: u8,
    /// Breakdown text
    pub reason: &'static str,
    /// Short factor tag
    pub factor: &'static str,
}

impl Rule {
    const fn new(signal: Signal, points: u8, reason: &'static str, factor: &'static str) -> Self {
        Self { signal, points, reason, factor }
    }

    /// Whether this rule fires for `input`
    #[inline]
    pub fn fires(&self, input: &RiskInput) -> bool {
        input.has(self.signal)
    }
}

/// The scoring rules, in evaluation order
pub static RULES: [Rule; 20] = [
    // Identity & context
    Rule::new(Signal::NewDevice, 25, "New Device Detected", "New Device"),
    Rule::new(Signal::NewLocation, 20, "New Location", "New Location"),
    Rule::new(Signal::ImpossibleTravel, 20, "Impossible Travel Velocity", "Impossible Travel"),
    Rule::new(Signal::UnusualTime, 10, "Unusual Time (Baseline)", "Unusual Time"),
    Rule::new(Signal::ExcessiveFailedAttempts, 15, "Excessive Failed Attempts", "Brute Force Risk"),
    Rule::new(Signal::NavigationSensitive, 20, "Direct Jump to Sensitive Page", "Suspicious Nav"),
    Rule::new(Signal::NavigationBotLike, 20, "Bot-like Navigation Speed", "Bot Behavior"),
    // Mouse
    Rule::new(Signal::MouseSpeedAnomaly, 10, "Unusual mouse speed", "Unusual mouse speed"),
    Rule::new(Signal::MousePathRobotic, 10, "Robotic mouse pattern", "Robotic mouse pattern"),
    // Clicks
    Rule::new(Signal::ClickRateAnomaly, 10, "Abnormal Click Frequency", "Click Flooding"),
    Rule::new(Signal::RageClicks, 10, "Rage clicks", "Rage clicks"),
    Rule::new(Signal::NonInteractiveClicks, 5, "Clicks on non-interactive areas", "Confusion / Script"),
    // Typing
    Rule::new(Signal::TypingSpeedDeviation, 10, "Typing Speed Deviation", "Abnormal Typing"),
    Rule::new(Signal::TypingErratic, 10, "Erratic Typing Rhythm", "Erratic Typing"),
    Rule::new(Signal::TypingErrorRateHigh, 15, "High typing error rate", "High typing error rate"),
    Rule::new(Signal::TypingPerfectBot, 10, "Superhuman Typing Speed", "Script Injection"),
    Rule::new(Signal::SensitiveFieldPaste, 10, "Copy-paste into password", "Copy-paste into password"),
    // Form interaction
    Rule::new(Signal::FormCompletionSpeedHigh, 10, "Unrealistically fast form", "Unrealistically fast form"),
    Rule::new(Signal::FormFieldOrderUnusual, 10, "Unusual field order", "Unusual field order"),
    Rule::new(Signal::HesitationAnomaly, 10, "Extreme Hesitation", "Anomaly"),
];

/// The rule table, for auditing and display
pub fn rules() -> &'static [Rule] {
    &RULES
}
