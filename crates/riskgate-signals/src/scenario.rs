//! What-if scenarios
//!
//! Coarse knobs a developer turns to see how the engine reacts, mapped onto
//! engine signals. Used by the CLI `simulate` command.

use riskgate_engine::RiskInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! knob {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const VARIANTS: &'static [&'static str] = &[$($key),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.replace('-', "_").to_lowercase().as_str() {
                    $($key => Ok($name::$variant),)+
                    other => Err(format!(
                        "invalid {}: {} (expected one of: {})",
                        stringify!($name),
                        other,
                        Self::VARIANTS.join(", ")
                    )),
                }
            }
        }
    };
}

knob!(
    /// Reputation class of the source address
    IpType { Residential => "residential", Datacenter => "datacenter", Tor => "tor" } default Residential
);
knob!(
    /// Distance from the previous login
    GeoVelocity { Local => "local", Regional => "regional", Impossible => "impossible" } default Local
);
knob!(DeviceStatus { Known => "known", New => "new", Emulator => "emulator" } default Known);
knob!(TimeContext { Business => "business", Unusual => "unusual" } default Business);
knob!(
    MouseSpeed {
        VerySlow => "very_slow",
        Normal => "normal",
        Fast => "fast",
        VeryFast => "very_fast",
    } default Normal
);
knob!(MousePattern { Smooth => "smooth", Erratic => "erratic", Robotic => "robotic" } default Smooth);
knob!(MouseIdle { Normal => "normal", Burst => "burst" } default Normal);
knob!(
    ClickRate { Low => "low", Normal => "normal", High => "high", VeryHigh => "very_high" } default Normal
);
knob!(Misclicks { Low => "low", Normal => "normal", High => "high" } default Normal);
knob!(
    TypingErrorRate {
        Low => "low",
        Normal => "normal",
        High => "high",
        VeryHigh => "very_high",
    } default Normal
);
knob!(
    FormSpeed {
        VerySlow => "very_slow",
        Normal => "normal",
        Fast => "fast",
        BotFast => "bot_fast",
    } default Normal
);
knob!(FieldOrder { Normal => "normal", Unusual => "unusual" } default Normal);

/// A full set of knobs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub ip_type: IpType,
    pub geo_velocity: GeoVelocity,
    pub device_status: DeviceStatus,
    pub time_context: TimeContext,
    pub mouse_speed: MouseSpeed,
    pub mouse_pattern: MousePattern,
    pub mouse_idle: MouseIdle,
    pub click_rate: ClickRate,
    pub rage_clicks: bool,
    pub misclicks: Misclicks,
    pub typing_error_rate: TypingErrorRate,
    pub sensitive_paste: bool,
    pub form_speed: FormSpeed,
    pub field_order: FieldOrder,
}

impl Scenario {
    /// Engine input for this scenario
    pub fn to_risk_input(&self) -> RiskInput {
        let robotic = self.mouse_pattern == MousePattern::Robotic;
        RiskInput {
            is_new_device: self.device_status == DeviceStatus::New,
            is_new_location: self.geo_velocity != GeoVelocity::Local,
            is_impossible_travel: self.geo_velocity == GeoVelocity::Impossible,
            is_unusual_time: self.time_context == TimeContext::Unusual,
            failed_attempts: if self.ip_type == IpType::Tor { 4 } else { 0 },
            navigation_sensitive: false,
            navigation_bot_like: robotic,

            mouse_speed_anomaly: matches!(self.mouse_speed, MouseSpeed::VerySlow | MouseSpeed::VeryFast),
            mouse_path_robotic: robotic,
            hesitation_anomaly: self.mouse_idle == MouseIdle::Burst
                || self.form_speed == FormSpeed::VerySlow,

            click_rate_anomaly: matches!(self.click_rate, ClickRate::High | ClickRate::VeryHigh),
            rage_clicks_detected: self.rage_clicks,
            non_interactive_clicks: self.misclicks == Misclicks::High,

            typing_error_rate_high: matches!(
                self.typing_error_rate,
                TypingErrorRate::High | TypingErrorRate::VeryHigh
            ),
            typing_perfect_bot: self.typing_error_rate == TypingErrorRate::Low
                && self.form_speed == FormSpeed::BotFast,
            sensitive_field_paste: self.sensitive_paste,
            typing_speed_deviation: false,
            typing_consistency_erratic: false,

            form_completion_speed_high: self.form_speed == FormSpeed::BotFast,
            form_field_order_unusual: self.field_order == FieldOrder::Unusual,
        }
    }

    /// Illustrative source address for the scenario
    pub fn source_ip(&self) -> &'static str {
        match self.ip_type {
            IpType::Tor => "185.220.101.4",
            IpType::Datacenter => "45.22.19.112",
            IpType::Residential => "192.168.1.42",
        }
    }

    pub fn location_label(&self) -> &'static str {
        match self.geo_velocity {
            GeoVelocity::Local => "San Francisco, US",
            GeoVelocity::Regional => "Portland, US",
            GeoVelocity::Impossible => "Moscow, RU",
        }
    }

    pub fn device_label(&self) -> &'static str {
        match self.device_status {
            DeviceStatus::Emulator => "Android Emulator",
            DeviceStatus::Known | DeviceStatus::New => "Chrome / macOS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgate_engine::{score, EnforcementAction, RiskLevel};

    #[test]
    fn test_default_scenario_is_clean() {
        assert_eq!(Scenario::default().to_risk_input(), RiskInput::clean());
        assert_eq!(score(&Scenario::default().to_risk_input()).score.value(), 10);
    }

    #[test]
    fn test_tor_means_brute_force() {
        let scenario = Scenario { ip_type: IpType::Tor, ..Default::default() };
        let input = scenario.to_risk_input();
        assert_eq!(input.failed_attempts, 4);
        assert_eq!(score(&input).factors, vec!["Brute Force Risk"]);
        assert_eq!(scenario.source_ip(), "185.220.101.4");
    }

    #[test]
    fn test_robotic_pattern_drives_two_signals() {
        let input = Scenario { mouse_pattern: MousePattern::Robotic, ..Default::default() }
            .to_risk_input();
        assert!(input.navigation_bot_like);
        assert!(input.mouse_path_robotic);
        assert_eq!(score(&input).score.value(), 40);
    }

    #[test]
    fn test_perfect_bot_requires_low_errors_and_bot_form() {
        let bot = Scenario {
            typing_error_rate: TypingErrorRate::Low,
            form_speed: FormSpeed::BotFast,
            ..Default::default()
        }
        .to_risk_input();
        assert!(bot.typing_perfect_bot);
        assert!(bot.form_completion_speed_high);

        let fast_only = Scenario { form_speed: FormSpeed::BotFast, ..Default::default() }
            .to_risk_input();
        assert!(!fast_only.typing_perfect_bot);
    }

    #[test]
    fn test_hesitation_sources() {
        let idle = Scenario { mouse_idle: MouseIdle::Burst, ..Default::default() };
        let slow = Scenario { form_speed: FormSpeed::VerySlow, ..Default::default() };
        assert!(idle.to_risk_input().hesitation_anomaly);
        assert!(slow.to_risk_input().hesitation_anomaly);
    }

    #[test]
    fn test_impossible_attack_is_blocked() {
        let scenario = Scenario {
            ip_type: IpType::Tor,
            geo_velocity: GeoVelocity::Impossible,
            device_status: DeviceStatus::New,
            ..Default::default()
        };
        let out = score(&scenario.to_risk_input());
        // 10 + 25 + 20 + 20 + 15
        assert_eq!(out.score.value(), 90);
        assert_eq!(out.level, RiskLevel::Critical);
        assert_eq!(out.action, EnforcementAction::Blocked);
        assert_eq!(scenario.location_label(), "Moscow, RU");
    }

    #[test]
    fn test_knob_parsing() {
        assert_eq!("very-fast".parse::<MouseSpeed>().unwrap(), MouseSpeed::VeryFast);
        assert_eq!("BOT_FAST".parse::<FormSpeed>().unwrap(), FormSpeed::BotFast);
        let err = "warp".parse::<GeoVelocity>().unwrap_err();
        assert!(err.contains("local, regional, impossible"));
    }
}
