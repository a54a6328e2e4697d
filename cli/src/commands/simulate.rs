//! Simulate command

use crate::{output, output::OutputFormat, SimulateArgs};
use chrono::{DateTime, Utc};
use colored::Colorize;
use riskgate_engine::{score, EnforcementAction, RiskLevel, RiskOutput};
use riskgate_signals::Scenario;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub scenario: Scenario,
    pub risk_analysis: RiskAnalysis,
    pub details: Details,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<Explanation>,
}

#[derive(Debug, Serialize)]
pub struct RiskAnalysis {
    pub score: u8,
    pub level: RiskLevel,
    pub action: EnforcementAction,
    pub factors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Details {
    pub breakdown: Vec<Impact>,
}

#[derive(Debug, Serialize)]
pub struct Impact {
    pub reason: String,
    pub impact: String,
}

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub summary: String,
    pub reasoning: String,
}

pub fn handle(args: SimulateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let explain = args.explain;
    let scenario = scenario(args);
    let verdict = score(&scenario.to_risk_input());
    tracing::debug!(score = %verdict.score, "Simulated {}", scenario.location_label());

    let response = respond(scenario, &verdict, explain);
    format.emit(&response, |r| {
        println!(
            "{} {}  {} {}  {}",
            "Source:".bold(),
            r.scenario.source_ip(),
            "Location:".bold(),
            r.scenario.location_label(),
            r.scenario.device_label().dimmed()
        );
        output::print_verdict(&verdict);
        if let Some(explanation) = &r.ai_explanation {
            println!("\n{}\n{}", explanation.summary.bold(), explanation.reasoning);
        }
    })
}

fn scenario(args: SimulateArgs) -> Scenario {
    Scenario {
        ip_type: args.ip_type,
        geo_velocity: args.geo_velocity,
        device_status: args.device_status,
        time_context: args.time_context,
        mouse_speed: args.mouse_speed,
        mouse_pattern: args.mouse_pattern,
        mouse_idle: args.mouse_idle,
        click_rate: args.click_rate,
        rage_clicks: args.rage_clicks,
        misclicks: args.misclicks,
        typing_error_rate: args.typing_error_rate,
        sensitive_paste: args.sensitive_paste,
        form_speed: args.form_speed,
        field_order: args.field_order,
    }
}

fn respond(scenario: Scenario, verdict: &RiskOutput, explain: bool) -> SimulationResponse {
    let id = uuid::Uuid::new_v4().simple().to_string();
    SimulationResponse {
        success: true,
        request_id: format!("req_{}", &id[..9]),
        timestamp: Utc::now(),
        scenario,
        risk_analysis: RiskAnalysis {
            score: verdict.score.value(),
            level: verdict.level,
            action: verdict.action,
            factors: verdict.factors.clone(),
        },
        details: Details {
            breakdown: verdict
                .breakdown
                .iter()
                .map(|b| Impact { reason: b.reason.clone(), impact: format!("+{}", b.points) })
                .collect(),
        },
        ai_explanation: explain.then(|| explanation(verdict)),
    }
}

/// Locally composed explanation; no model is called
fn explanation(verdict: &RiskOutput) -> Explanation {
    let reasoning = if verdict.factors.is_empty() {
        "User activity matches baseline. No risk factors detected.".to_string()
    } else {
        format!(
            "User activity deviates significantly from baseline. {} detected.",
            verdict.factors.join(", ")
        )
    };
    Explanation {
        summary: format!("Detected {} risk anomaly ({}/100).", verdict.level, verdict.score),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgate_signals::scenario::{DeviceStatus, GeoVelocity, IpType};

    fn attack() -> Scenario {
        Scenario {
            ip_type: IpType::Tor,
            geo_velocity: GeoVelocity::Impossible,
            device_status: DeviceStatus::New,
            ..Default::default()
        }
    }

    #[test]
    fn test_envelope_shape() {
        let scenario = attack();
        let verdict = score(&scenario.to_risk_input());
        let json = serde_json::to_value(respond(scenario, &verdict, false)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["request_id"].as_str().unwrap().len(), 13);
        assert_eq!(json["risk_analysis"]["score"], 90);
        assert_eq!(json["risk_analysis"]["level"], "CRITICAL");
        assert_eq!(json["risk_analysis"]["action"], "BLOCKED");
        assert_eq!(json["details"]["breakdown"][0]["reason"], "New Device Detected");
        assert_eq!(json["details"]["breakdown"][0]["impact"], "+25");
        assert_eq!(json["scenario"]["ip_type"], "tor");
        assert!(json.get("ai_explanation").is_none());
    }

    #[test]
    fn test_explanation() {
        let scenario = attack();
        let verdict = score(&scenario.to_risk_input());
        let response = respond(scenario, &verdict, true);
        let explanation = response.ai_explanation.unwrap();
        assert_eq!(explanation.summary, "Detected CRITICAL risk anomaly (90/100).");
        assert!(explanation.reasoning.contains("New Device, New Location"));
    }

    #[test]
    fn test_clean_explanation() {
        let verdict = score(&Scenario::default().to_risk_input());
        assert!(explanation(&verdict).reasoning.contains("No risk factors"));
    }
}
