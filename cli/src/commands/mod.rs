//! CLI Commands

pub mod config;
pub mod report;
pub mod rules;
pub mod score;
pub mod simulate;

use riskgate_common::{RiskGateError, RiskGateResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a JSON or YAML document, chosen by file extension
pub fn read_document<T: DeserializeOwned>(path: &Path) -> RiskGateResult<T> {
    let content = fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| RiskGateError::Serialization(format!("{}: {}", path.display(), e)))
}
