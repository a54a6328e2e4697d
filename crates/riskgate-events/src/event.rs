//! Security events
//!
//! One scored attempt as shown in the event stream. The event-level action
//! vocabulary is wider than the engine's: a failed login is always denied,
//! and locks the account when the verdict is critical.

use chrono::{DateTime, Utc};
use riskgate_common::{RiskScore, UserId};
use riskgate_engine::{BreakdownEntry, EnforcementAction, RiskLevel, RiskOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Developer,
    User,
}

/// Identity an event is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    LoginSuccess,
    LoginFailed,
    MfaChallenge,
    Logout,
    ApiAccess,
    SessionTerminated,
    SensitiveChange,
}

impl EventType {
    /// Login events spawn sessions
    pub fn is_login(&self) -> bool {
        matches!(self, EventType::LoginSuccess | EventType::LoginFailed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSource {
    Web,
    Mobile,
    Api,
}

/// Action recorded on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventAction {
    #[serde(rename = "ALLOWED")]
    Allowed,
    #[serde(rename = "MFA_REQ")]
    MfaReq,
    #[serde(rename = "BLOCKED")]
    Blocked,
    #[serde(rename = "LOCKED")]
    Locked,
}

impl EventAction {
    /// Event action for a verdict on an event of `event_type`
    pub fn derive(event_type: EventType, verdict: &RiskOutput) -> Self {
        if event_type == EventType::LoginFailed {
            return if verdict.level == RiskLevel::Critical {
                EventAction::Locked
            } else {
                EventAction::Blocked
            };
        }
        match verdict.action {
            EnforcementAction::Allowed => EventAction::Allowed,
            EnforcementAction::MfaRequired => EventAction::MfaReq,
            EnforcementAction::Blocked => EventAction::Blocked,
        }
    }

    /// Blocked or locked
    pub fn is_denial(&self) -> bool {
        matches!(self, EventAction::Blocked | EventAction::Locked)
    }
}

/// Caller-supplied context for an event, before scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub event_type: EventType,
    pub user: UserRef,
    pub source: EventSource,
    pub location: String,
    pub ip: String,
    pub device: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub user: UserRef,
    pub risk_level: RiskLevel,
    pub risk_score: RiskScore,
    pub action: EventAction,
    pub source: EventSource,
    pub location: String,
    pub ip: String,
    pub device: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub risk_breakdown: Vec<BreakdownEntry>,
    #[serde(default)]
    pub is_false_positive: bool,
    #[serde(default)]
    pub reviewed: bool,
}

impl SecurityEvent {
    /// Combine a draft with the engine's verdict
    pub fn from_verdict(draft: EventDraft, verdict: &RiskOutput) -> Self {
        Self {
            id: format!("evt_{}", uuid::Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            action: EventAction::derive(draft.event_type, verdict),
            event_type: draft.event_type,
            user: draft.user,
            risk_level: verdict.level,
            risk_score: verdict.score,
            source: draft.source,
            location: draft.location,
            ip: draft.ip,
            device: draft.device,
            risk_factors: verdict.factors.clone(),
            risk_breakdown: verdict.breakdown.clone(),
            is_false_positive: false,
            reviewed: false,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_level >= RiskLevel::High
    }
}
