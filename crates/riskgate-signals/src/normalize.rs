//! Signal normalization
//!
//! Validates telemetry against the input contract, then derives every
//! engine signal independently from the telemetry and the user's baseline.

use crate::baseline::UserBaseline;
use crate::config::NormalizerConfig;
use crate::error::SignalError;
use crate::geo::haversine_km;
use crate::telemetry::LoginTelemetry;
use chrono::Timelike;
use riskgate_engine::{RiskInput, Signal};

/// Telemetry → [`RiskInput`] converter
#[derive(Debug, Clone, Default)]
pub struct SignalNormalizer {
    config: NormalizerConfig,
}

impl SignalNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Build the engine input for one attempt
    pub fn normalize(
        &self,
        telemetry: &LoginTelemetry,
        baseline: &UserBaseline,
    ) -> Result<RiskInput, SignalError> {
        validate(telemetry)?;
        baseline.validate()?;

        let input = RiskInput {
            is_new_device: !baseline.knows_device(&telemetry.device_id),
            is_new_location: self.is_new_location(telemetry, baseline),
            is_impossible_travel: self.is_impossible_travel(telemetry, baseline),
            is_unusual_time: !baseline.is_typical_hour(telemetry.timestamp.hour()),
            failed_attempts: telemetry.failed_attempts,

            navigation_sensitive: telemetry.navigation.jumped_to_sensitive,
            navigation_bot_like: above(
                telemetry.navigation.pages_per_minute,
                self.config.bot_pages_per_minute,
            ),

            mouse_speed_anomaly: telemetry.mouse.velocity_px_s.is_some_and(|v| {
                v < self.config.mouse_velocity_min || v > self.config.mouse_velocity_max
            }),
            mouse_path_robotic: telemetry
                .mouse
                .path_linearity
                .is_some_and(|l| l >= self.config.robotic_path_linearity),

            click_rate_anomaly: above(
                telemetry.clicks.clicks_per_minute,
                self.config.click_flood_per_minute,
            ),
            rage_clicks_detected: telemetry.clicks.rage_clicks > 0,
            non_interactive_clicks: telemetry.clicks.missed_clicks > self.config.missed_clicks_max,

            typing_speed_deviation: self.is_typing_speed_deviation(telemetry, baseline),
            typing_consistency_erratic: above(
                telemetry.typing.variance,
                self.config.erratic_variance,
            ),
            typing_error_rate_high: above(
                telemetry.typing.error_rate(),
                self.config.error_rate_max,
            ),
            typing_perfect_bot: self.is_perfect_bot(telemetry),
            sensitive_field_paste: telemetry.typing.sensitive_pastes > 0,

            form_completion_speed_high: telemetry
                .form
                .completion_secs
                .is_some_and(|s| s < self.config.min_form_secs),
            form_field_order_unusual: telemetry.form.field_order_unusual,
            hesitation_anomaly: above(
                telemetry.form.max_idle_secs,
                self.config.hesitation_idle_secs,
            ),
        };

        tracing::debug!(
            user = %telemetry.user_id,
            device = %telemetry.device_id,
            fired = Signal::ALL.iter().filter(|s| input.has(**s)).count(),
            "normalized telemetry"
        );

        Ok(input)
    }

    fn is_new_location(&self, telemetry: &LoginTelemetry, baseline: &UserBaseline) -> bool {
        telemetry
            .geo
            .as_ref()
            .is_some_and(|geo| !baseline.knows_country(&geo.country))
    }

    fn is_impossible_travel(&self, telemetry: &LoginTelemetry, baseline: &UserBaseline) -> bool {
        let (Some(current), Some(last), Some(last_access)) =
            (&telemetry.geo, &baseline.last_location, baseline.last_access)
        else {
            return false;
        };

        let distance = haversine_km(last, current);
        let elapsed_secs = (telemetry.timestamp - last_access).num_seconds();
        if elapsed_secs < 0 {
            // Older than the last accepted login; ordering is unknown
            tracing::debug!("Telemetry predates last access by {}s", -elapsed_secs);
            return false;
        }
        if elapsed_secs == 0 {
            return distance > 0.0;
        }

        let hours = elapsed_secs as f64 / 3600.0;
        let speed = distance / hours;
        if speed > self.config.max_travel_kmh {
            tracing::debug!(
                "Travel of {:.0} km in {:.0} minutes is impossible",
                distance,
                hours * 60.0
            );
            return true;
        }
        false
    }

    fn is_typing_speed_deviation(&self, telemetry: &LoginTelemetry, baseline: &UserBaseline) -> bool {
        match (telemetry.typing.speed_wpm, baseline.typing_speed_avg_wpm) {
            (Some(speed), Some(avg)) => {
                ((speed - avg).abs() / avg) > self.config.typing_deviation_ratio
            }
            _ => false,
        }
    }

    fn is_perfect_bot(&self, telemetry: &LoginTelemetry) -> bool {
        let typing = &telemetry.typing;
        if typing.total_keys <= self.config.perfect_bot_min_keys || typing.backspaces > 0 {
            return false;
        }
        above(typing.speed_wpm, self.config.superhuman_wpm)
            || typing.variance.is_some_and(|v| v < self.config.bot_variance)
    }
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn validate(telemetry: &LoginTelemetry) -> Result<(), SignalError> {
    if telemetry.device_id.trim().is_empty() {
        return Err(SignalError::MissingField("device_id"));
    }
    if let Some(geo) = &telemetry.geo {
        geo.validate()?;
    }

    let measurements = [
        ("navigation.pages_per_minute", telemetry.navigation.pages_per_minute),
        ("mouse.velocity_px_s", telemetry.mouse.velocity_px_s),
        ("clicks.clicks_per_minute", telemetry.clicks.clicks_per_minute),
        ("typing.speed_wpm", telemetry.typing.speed_wpm),
        ("form.completion_secs", telemetry.form.completion_secs),
        ("form.max_idle_secs", telemetry.form.max_idle_secs),
    ];
    for (field, value) in measurements {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(SignalError::InvalidMeasurement { field, value });
            }
        }
    }

    let unit = [
        ("mouse.path_linearity", telemetry.mouse.path_linearity),
        ("typing.variance", telemetry.typing.variance),
    ];
    for (field, value) in unit {
        if let Some(value) = value {
            if !(0.0..=1.0).contains(&value) {
                return Err(SignalError::OutOfUnitRange { field, value });
            }
        }
    }

    if telemetry.typing.backspaces > telemetry.typing.total_keys {
        return Err(SignalError::InconsistentCounts(format!(
            "{} backspaces out of {} keys",
            telemetry.typing.backspaces, telemetry.typing.total_keys
        )));
    }

    Ok(())
}
