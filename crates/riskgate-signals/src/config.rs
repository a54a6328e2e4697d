//! Normalization thresholds

use serde::{Deserialize, Serialize};

/// Thresholds that turn measurements into signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Fastest plausible travel between two logins (airliner)
    pub max_travel_kmh: f64,
    /// Navigation faster than this is bot-like
    pub bot_pages_per_minute: f64,
    /// Human mouse velocity band, px/s
    pub mouse_velocity_min: f64,
    pub mouse_velocity_max: f64,
    /// Path linearity at or above this is robotic
    pub robotic_path_linearity: f64,
    /// Click flooding above this rate
    pub click_flood_per_minute: f64,
    /// More non-interactive clicks than this is confusion or scripting
    pub missed_clicks_max: u32,
    /// Relative deviation from the typing speed baseline
    pub typing_deviation_ratio: f64,
    /// Inter-key variance above this is erratic
    pub erratic_variance: f64,
    /// Inter-key variance below this is machine-like
    pub bot_variance: f64,
    /// Backspace ratio above this is a high error rate
    pub error_rate_max: f64,
    /// Keys needed before a zero-error run is considered
    pub perfect_bot_min_keys: u32,
    pub superhuman_wpm: f64,
    /// Forms completed faster than this are not human
    pub min_form_secs: f64,
    /// Idle gaps longer than this are hesitation anomalies
    pub hesitation_idle_secs: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_travel_kmh: 900.0,
            bot_pages_per_minute: 60.0,
            mouse_velocity_min: 50.0,
            mouse_velocity_max: 3000.0,
            robotic_path_linearity: 0.98,
            click_flood_per_minute: 120.0,
            missed_clicks_max: 5,
            typing_deviation_ratio: 0.5,
            erratic_variance: 0.6,
            bot_variance: 0.05,
            error_rate_max: 0.15,
            perfect_bot_min_keys: 10,
            superhuman_wpm: 120.0,
            min_form_secs: 2.0,
            hesitation_idle_secs: 30.0,
        }
    }
}
