//! Verdict types
//!
//! Level and action are pure functions of the score; neither can be set
//! independently of it.

use riskgate_common::RiskScore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score classified as [`RiskLevel::Low`]
pub const LOW_MAX: u8 = 30;
/// Highest score classified as [`RiskLevel::Medium`]
pub const MEDIUM_MAX: u8 = 60;
/// Highest score classified as [`RiskLevel::High`]
pub const HIGH_MAX: u8 = 80;

/// Coarse risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// 0-30
    Low,
    /// 31-60
    Medium,
    /// 61-80
    High,
    /// 81-100
    Critical,
}

impl RiskLevel {
    /// Classify a score
    pub fn from_score(score: RiskScore) -> Self {
        match score.value() {
            s if s <= LOW_MAX => RiskLevel::Low,
            s if s <= MEDIUM_MAX => RiskLevel::Medium,
            s if s <= HIGH_MAX => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Enforcement action for this level
    pub fn action(&self) -> EnforcementAction {
        match self {
            RiskLevel::Low | RiskLevel::Medium => EnforcementAction::Allowed,
            RiskLevel::High => EnforcementAction::MfaRequired,
            RiskLevel::Critical => EnforcementAction::Blocked,
        }
    }

    /// Allowed, but the caller should keep watching.
    ///
    /// The engine's action for MEDIUM is plain `ALLOWED`; monitoring is a
    /// caller decision derived from the level.
    pub fn requires_monitoring(&self) -> bool {
        matches!(self, RiskLevel::Medium)
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended enforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnforcementAction {
    /// Let the attempt through
    Allowed,
    /// Challenge with a second factor
    MfaRequired,
    /// Deny the attempt
    Blocked,
}

impl EnforcementAction {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            EnforcementAction::Allowed => "ALLOWED",
            EnforcementAction::MfaRequired => "MFA_REQUIRED",
            EnforcementAction::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for EnforcementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fired rule's contribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Human-readable reason
    pub reason: String,
    /// Points added
    pub points: u8,
}

/// Engine verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskOutput {
    /// Clamped score
    pub score: RiskScore,
    /// Bucket derived from `score`
    pub level: RiskLevel,
    /// Action derived from `level`
    pub action: EnforcementAction,
    /// Fired rules in table order
    pub breakdown: Vec<BreakdownEntry>,
    /// Short tags, parallel to `breakdown`
    pub factors: Vec<String>,
}

impl RiskOutput {
    /// Sum of the fired rules' points, before the base score and clamping
    pub fn raw_contribution(&self) -> u32 {
        self.breakdown.iter().map(|b| b.points as u32).sum()
    }
}
