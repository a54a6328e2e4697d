//! Session tracking

use crate::event::{SecurityEvent, UserRef};
use chrono::{DateTime, Utc};
use riskgate_common::RiskScore;
use riskgate_engine::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Terminated,
    Challenged,
    Blocked,
}

impl SessionStatus {
    /// Terminated or blocked
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionStatus::Terminated | SessionStatus::Blocked)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "ACTIVE",
            SessionStatus::Terminated => "TERMINATED",
            SessionStatus::Challenged => "CHALLENGED",
            SessionStatus::Blocked => "BLOCKED",
        };
        f.write_str(s)
    }
}

/// A session opened by a login event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user: UserRef,
    pub ip: String,
    pub location: String,
    pub device: String,
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    pub status: SessionStatus,
    pub risk_factors: Vec<String>,
}

impl Session {
    /// Session spawned by a login event; denied logins start blocked
    pub fn from_event(event: &SecurityEvent) -> Self {
        let status = if event.action.is_denial() {
            SessionStatus::Blocked
        } else {
            SessionStatus::Active
        };

        Self {
            id: format!("sess_{}", uuid::Uuid::new_v4().simple()),
            user: event.user.clone(),
            ip: event.ip.clone(),
            location: event.location.clone(),
            device: event.device.clone(),
            started_at: event.timestamp,
            last_active: event.timestamp,
            risk_score: event.risk_score,
            risk_level: event.risk_level,
            status,
            risk_factors: event.risk_factors.clone(),
        }
    }
}
