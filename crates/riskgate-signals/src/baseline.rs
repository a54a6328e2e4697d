//! Per-user behavioral baseline
//!
//! What "normal" looks like for one identity. The caller owns and persists
//! it; the normalizer only reads it.

use crate::error::SignalError;
use crate::geo::GeoPoint;
use crate::telemetry::LoginTelemetry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserBaseline {
    pub known_devices: HashSet<String>,
    /// Country codes, matched case-insensitively
    pub known_countries: HashSet<String>,
    pub last_location: Option<GeoPoint>,
    pub last_access: Option<DateTime<Utc>>,
    /// Inclusive `(start, end)` hours in UTC; may wrap midnight
    pub typical_access_hours: Option<(u32, u32)>,
    pub typing_speed_avg_wpm: Option<f64>,
}

impl Default for UserBaseline {
    fn default() -> Self {
        Self {
            known_devices: HashSet::new(),
            known_countries: HashSet::new(),
            last_location: None,
            last_access: None,
            typical_access_hours: Some((8, 18)), // 8 AM - 6 PM
            typing_speed_avg_wpm: Some(60.0),
        }
    }
}

impl UserBaseline {
    /// Fold an accepted attempt into the baseline
    pub fn observe(&mut self, telemetry: &LoginTelemetry) {
        self.known_devices.insert(telemetry.device_id.clone());
        if let Some(geo) = &telemetry.geo {
            self.known_countries.insert(geo.country.to_uppercase());
            self.last_location = Some(geo.clone());
        }
        self.last_access = Some(telemetry.timestamp);

        if let Some(speed) = telemetry.typing.speed_wpm {
            self.typing_speed_avg_wpm = Some(match self.typing_speed_avg_wpm {
                Some(avg) => avg * 0.8 + speed * 0.2,
                None => speed,
            });
        }
    }

    pub fn knows_device(&self, device_id: &str) -> bool {
        self.known_devices.contains(device_id)
    }

    pub fn knows_country(&self, country: &str) -> bool {
        self.known_countries
            .iter()
            .any(|known| known.eq_ignore_ascii_case(country))
    }

    /// Whether `hour` falls inside the typical window. Always true without one.
    pub fn is_typical_hour(&self, hour: u32) -> bool {
        match self.typical_access_hours {
            Some((start, end)) if start <= end => hour >= start && hour <= end,
            Some((start, end)) => hour >= start || hour <= end,
            None => true,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SignalError> {
        if let Some((start, end)) = self.typical_access_hours {
            if start > 23 || end > 23 {
                return Err(SignalError::InvalidBaseline(format!(
                    "typical hours must be 0-23, got ({}, {})",
                    start, end
                )));
            }
        }
        if let Some(avg) = self.typing_speed_avg_wpm {
            if !avg.is_finite() || avg <= 0.0 {
                return Err(SignalError::InvalidBaseline(format!(
                    "typing speed average must be positive, got {}",
                    avg
                )));
            }
        }
        if let Some(location) = &self.last_location {
            location.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgate_common::UserId;

    #[test]
    fn test_typical_hours() {
        let baseline = UserBaseline::default();
        assert!(baseline.is_typical_hour(8));
        assert!(baseline.is_typical_hour(18));
        assert!(!baseline.is_typical_hour(3));
        assert!(!baseline.is_typical_hour(19));
    }

    #[test]
    fn test_typical_hours_wrap_midnight() {
        let baseline = UserBaseline {
            typical_access_hours: Some((22, 6)),
            ..Default::default()
        };
        assert!(baseline.is_typical_hour(23));
        assert!(baseline.is_typical_hour(2));
        assert!(!baseline.is_typical_hour(12));
    }

    #[test]
    fn test_observe_learns_device_and_country() {
        let mut baseline = UserBaseline { typing_speed_avg_wpm: None, ..Default::default() };
        let mut t = LoginTelemetry::new(UserId::new("u1").unwrap(), "dev-1", Utc::now());
        t.geo = Some(GeoPoint::new(51.5, -0.12, "gb"));
        t.typing.speed_wpm = Some(50.0);
        baseline.observe(&t);

        assert!(baseline.knows_device("dev-1"));
        assert!(baseline.knows_country("GB"));
        assert_eq!(baseline.last_access, Some(t.timestamp));
        assert_eq!(baseline.typing_speed_avg_wpm, Some(50.0));

        t.typing.speed_wpm = Some(100.0);
        baseline.observe(&t);
        let avg = baseline.typing_speed_avg_wpm.unwrap();
        assert!((avg - 60.0).abs() < 1e-9, "got {}", avg);
    }

    #[test]
    fn test_default_typing_speed() {
        assert_eq!(UserBaseline::default().typing_speed_avg_wpm, Some(60.0));
    }

    #[test]
    fn test_loaded_countries_match_any_case() {
        let baseline: UserBaseline =
            serde_json::from_str(r#"{"known_countries": ["us", "De"]}"#).unwrap();
        assert!(baseline.knows_country("us"));
        assert!(baseline.knows_country("US"));
        assert!(baseline.knows_country("de"));
        assert!(!baseline.knows_country("FR"));
        // Omitted fields keep their defaults
        assert_eq!(baseline.typical_access_hours, Some((8, 18)));
    }

    #[test]
    fn test_validate_hours() {
        let bad = UserBaseline { typical_access_hours: Some((8, 24)), ..Default::default() };
        assert!(bad.validate().is_err());
        assert!(UserBaseline::default().validate().is_ok());
    }
}
