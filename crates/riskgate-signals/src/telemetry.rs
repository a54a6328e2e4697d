//! Raw telemetry captured by the caller for one attempt
//!
//! Measurements are optional: an absent measurement never fires a signal.

use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use riskgate_common::UserId;
use serde::{Deserialize, Serialize};

/// Everything observed about one login/session attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginTelemetry {
    pub user_id: UserId,
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    #[serde(default)]
    pub failed_attempts: u32,
    #[serde(default)]
    pub navigation: NavigationTelemetry,
    #[serde(default)]
    pub mouse: MouseTelemetry,
    #[serde(default)]
    pub clicks: ClickTelemetry,
    #[serde(default)]
    pub typing: TypingTelemetry,
    #[serde(default)]
    pub form: FormTelemetry,
}

impl LoginTelemetry {
    pub fn new(user_id: UserId, device_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            user_id,
            device_id: device_id.into(),
            timestamp,
            geo: None,
            failed_attempts: 0,
            navigation: NavigationTelemetry::default(),
            mouse: MouseTelemetry::default(),
            clicks: ClickTelemetry::default(),
            typing: TypingTelemetry::default(),
            form: FormTelemetry::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationTelemetry {
    /// Landed on a sensitive page without traversing to it
    pub jumped_to_sensitive: bool,
    pub pages_per_minute: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseTelemetry {
    pub velocity_px_s: Option<f64>,
    /// 1.0 = perfectly straight segments
    pub path_linearity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickTelemetry {
    pub clicks_per_minute: Option<f64>,
    pub rage_clicks: u32,
    /// Clicks on non-interactive areas
    pub missed_clicks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTelemetry {
    pub speed_wpm: Option<f64>,
    /// Inter-key timing variance, 0.0 (machine) to 1.0
    pub variance: Option<f64>,
    pub total_keys: u32,
    pub backspaces: u32,
    /// Pastes into password or other sensitive fields
    pub sensitive_pastes: u32,
}

impl TypingTelemetry {
    /// Backspaces over total keys, `None` before any key
    pub fn error_rate(&self) -> Option<f64> {
        (self.total_keys > 0).then(|| self.backspaces as f64 / self.total_keys as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormTelemetry {
    pub completion_secs: Option<f64>,
    pub field_order_unusual: bool,
    /// Longest idle gap before an interaction
    pub max_idle_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_rate() {
        let typing = TypingTelemetry { total_keys: 40, backspaces: 10, ..Default::default() };
        assert_eq!(typing.error_rate(), Some(0.25));
        assert_eq!(TypingTelemetry::default().error_rate(), None);
    }

    #[test]
    fn test_sparse_json() {
        let t: LoginTelemetry = serde_json::from_str(
            r#"{"user_id": "u_alice", "device_id": "dev-1",
                "timestamp": "2024-05-01T10:00:00Z",
                "typing": {"speed_wpm": 65.0}}"#,
        )
        .unwrap();
        assert_eq!(t.user_id.as_str(), "u_alice");
        assert_eq!(t.typing.speed_wpm, Some(65.0));
        assert_eq!(t.failed_attempts, 0);
        assert!(t.geo.is_none());
        assert_eq!(t.clicks, ClickTelemetry::default());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let parsed = serde_json::from_str::<LoginTelemetry>(
            r#"{"user_id": "", "device_id": "d", "timestamp": "2024-05-01T10:00:00Z"}"#,
        );
        assert!(parsed.is_err());
    }
}
