//! Risk Input
//!
//! The normalized signal bag the engine consumes. Every field is observed
//! independently by the caller; absent fields deserialize to `false`/`0`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failed attempts strictly above this count trigger the brute-force rule
pub const FAILED_ATTEMPTS_THRESHOLD: u32 = 3;

/// Signals describing one login or session attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskInput {
    // Identity & context
    /// Device not seen before for this identity
    pub is_new_device: bool,
    /// Location not seen before for this identity
    pub is_new_location: bool,
    /// Travel velocity between consecutive logins is physically impossible
    pub is_impossible_travel: bool,
    /// Access outside the identity's usual hours
    pub is_unusual_time: bool,
    /// Recent failed authentication attempts
    pub failed_attempts: u32,

    // Navigation
    /// Jumped straight to a sensitive resource
    pub navigation_sensitive: bool,
    /// Traversal speed/pattern inconsistent with human browsing
    pub navigation_bot_like: bool,

    // Mouse
    /// Mouse velocity outside the human band
    pub mouse_speed_anomaly: bool,
    /// Mouse path too straight or too regular
    pub mouse_path_robotic: bool,

    // Clicks
    /// Click frequency far above normal
    pub click_rate_anomaly: bool,
    /// Repeated rapid clicks on the same target
    pub rage_clicks_detected: bool,
    /// Clicks landing on non-interactive areas
    pub non_interactive_clicks: bool,

    // Typing
    /// Typing speed deviates from the identity's baseline
    pub typing_speed_deviation: bool,
    /// Keystroke rhythm is erratic
    pub typing_consistency_erratic: bool,
    /// Backspace ratio above the human norm
    pub typing_error_rate_high: bool,
    /// High speed with zero corrections
    pub typing_perfect_bot: bool,
    /// Paste into a sensitive field (e.g. password)
    pub sensitive_field_paste: bool,

    // Form interaction
    /// Form submitted faster than a human can fill it
    pub form_completion_speed_high: bool,
    /// Fields filled in an unusual order
    pub form_field_order_unusual: bool,
    /// Extreme idle gaps before acting
    pub hesitation_anomaly: bool,
}

impl RiskInput {
    /// Input with every signal off
    pub fn clean() -> Self {
        Self::default()
    }

    /// Turn a signal on.
    ///
    /// For [`Signal::ExcessiveFailedAttempts`] this raises `failed_attempts`
    /// just past the threshold, leaving larger counts untouched.
    pub fn enable(&mut self, signal: Signal) -> &mut Self {
        match signal {
            Signal::NewDevice => self.is_new_device = true,
            Signal::NewLocation => self.is_new_location = true,
            Signal::ImpossibleTravel => self.is_impossible_travel = true,
            Signal::UnusualTime => self.is_unusual_time = true,
            Signal::ExcessiveFailedAttempts => {
                self.failed_attempts = self.failed_attempts.max(FAILED_ATTEMPTS_THRESHOLD + 1)
            }
            Signal::NavigationSensitive => self.navigation_sensitive = true,
            Signal::NavigationBotLike => self.navigation_bot_like = true,
            Signal::MouseSpeedAnomaly => self.mouse_speed_anomaly = true,
            Signal::MousePathRobotic => self.mouse_path_robotic = true,
            Signal::ClickRateAnomaly => self.click_rate_anomaly = true,
            Signal::RageClicks => self.rage_clicks_detected = true,
            Signal::NonInteractiveClicks => self.non_interactive_clicks = true,
            Signal::TypingSpeedDeviation => self.typing_speed_deviation = true,
            Signal::TypingErratic => self.typing_consistency_erratic = true,
            Signal::TypingErrorRateHigh => self.typing_error_rate_high = true,
            Signal::TypingPerfectBot => self.typing_perfect_bot = true,
            Signal::SensitiveFieldPaste => self.sensitive_field_paste = true,
            Signal::FormCompletionSpeedHigh => self.form_completion_speed_high = true,
            Signal::FormFieldOrderUnusual => self.form_field_order_unusual = true,
            Signal::HesitationAnomaly => self.hesitation_anomaly = true,
        }
        self
    }

    /// Builder form of [`RiskInput::enable`]
    pub fn with(mut self, signal: Signal) -> Self {
        self.enable(signal);
        self
    }

    /// Whether the condition behind `signal` holds
    pub fn has(&self, signal: Signal) -> bool {
        match signal {
            Signal::NewDevice => self.is_new_device,
            Signal::NewLocation => self.is_new_location,
            Signal::ImpossibleTravel => self.is_impossible_travel,
            Signal::UnusualTime => self.is_unusual_time,
            Signal::ExcessiveFailedAttempts => self.failed_attempts > FAILED_ATTEMPTS_THRESHOLD,
            Signal::NavigationSensitive => self.navigation_sensitive,
            Signal::NavigationBotLike => self.navigation_bot_like,
            Signal::MouseSpeedAnomaly => self.mouse_speed_anomaly,
            Signal::MousePathRobotic => self.mouse_path_robotic,
            Signal::ClickRateAnomaly => self.click_rate_anomaly,
            Signal::RageClicks => self.rage_clicks_detected,
            Signal::NonInteractiveClicks => self.non_interactive_clicks,
            Signal::TypingSpeedDeviation => self.typing_speed_deviation,
            Signal::TypingErratic => self.typing_consistency_erratic,
            Signal::TypingErrorRateHigh => self.typing_error_rate_high,
            Signal::TypingPerfectBot => self.typing_perfect_bot,
            Signal::SensitiveFieldPaste => self.sensitive_field_paste,
            Signal::FormCompletionSpeedHigh => self.form_completion_speed_high,
            Signal::FormFieldOrderUnusual => self.form_field_order_unusual,
            Signal::HesitationAnomaly => self.hesitation_anomaly,
        }
    }
}

/// One rule condition, in rule-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    /// `is_new_device`
    NewDevice,
    /// `is_new_location`
    NewLocation,
    /// `is_impossible_travel`
    ImpossibleTravel,
    /// `is_unusual_time`
    UnusualTime,
    /// `failed_attempts` above the threshold
    ExcessiveFailedAttempts,
    /// `navigation_sensitive`
    NavigationSensitive,
    /// `navigation_bot_like`
    NavigationBotLike,
    /// `mouse_speed_anomaly`
    MouseSpeedAnomaly,
    /// `mouse_path_robotic`
    MousePathRobotic,
    /// `click_rate_anomaly`
    ClickRateAnomaly,
    /// `rage_clicks_detected`
    RageClicks,
    /// `non_interactive_clicks`
    NonInteractiveClicks,
    /// `typing_speed_deviation`
    TypingSpeedDeviation,
    /// `typing_consistency_erratic`
    TypingErratic,
    /// `typing_error_rate_high`
    TypingErrorRateHigh,
    /// `typing_perfect_bot`
    TypingPerfectBot,
    /// `sensitive_field_paste`
    SensitiveFieldPaste,
    /// `form_completion_speed_high`
    FormCompletionSpeedHigh,
    /// `form_field_order_unusual`
    FormFieldOrderUnusual,
    /// `hesitation_anomaly`
    HesitationAnomaly,
}

impl Signal {
    /// Every signal, in rule-table order
    pub const ALL: [Signal; 20] = [
        Signal::NewDevice,
        Signal::NewLocation,
        Signal::ImpossibleTravel,
        Signal::UnusualTime,
        Signal::ExcessiveFailedAttempts,
        Signal::NavigationSensitive,
        Signal::NavigationBotLike,
        Signal::MouseSpeedAnomaly,
        Signal::MousePathRobotic,
        Signal::ClickRateAnomaly,
        Signal::RageClicks,
        Signal::NonInteractiveClicks,
        Signal::TypingSpeedDeviation,
        Signal::TypingErratic,
        Signal::TypingErrorRateHigh,
        Signal::TypingPerfectBot,
        Signal::SensitiveFieldPaste,
        Signal::FormCompletionSpeedHigh,
        Signal::FormFieldOrderUnusual,
        Signal::HesitationAnomaly,
    ];

    /// Stable kebab-case key
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::NewDevice => "new-device",
            Signal::NewLocation => "new-location",
            Signal::ImpossibleTravel => "impossible-travel",
            Signal::UnusualTime => "unusual-time",
            Signal::ExcessiveFailedAttempts => "excessive-failed-attempts",
            Signal::NavigationSensitive => "navigation-sensitive",
            Signal::NavigationBotLike => "navigation-bot-like",
            Signal::MouseSpeedAnomaly => "mouse-speed-anomaly",
            Signal::MousePathRobotic => "mouse-path-robotic",
            Signal::ClickRateAnomaly => "click-rate-anomaly",
            Signal::RageClicks => "rage-clicks",
            Signal::NonInteractiveClicks => "non-interactive-clicks",
            Signal::TypingSpeedDeviation => "typing-speed-deviation",
            Signal::TypingErratic => "typing-erratic",
            Signal::TypingErrorRateHigh => "typing-error-rate-high",
            Signal::TypingPerfectBot => "typing-perfect-bot",
            Signal::SensitiveFieldPaste => "sensitive-field-paste",
            Signal::FormCompletionSpeedHigh => "form-completion-speed-high",
            Signal::FormFieldOrderUnusual => "form-field-order-unusual",
            Signal::HesitationAnomaly => "hesitation-anomaly",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .iter()
            .copied()
            .find(|signal| signal.as_str() == s)
            .ok_or_else(|| format!("unknown signal: {}", s))
    }
}
