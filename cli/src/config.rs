//! CLI Configuration

use crate::output::OutputFormat;
use clap::ValueEnum;
use riskgate_common::{RiskGateError, RiskGateResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> RiskGateResult<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn save(&self, profile: Option<&str>) -> RiskGateResult<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn load_from(path: &Path) -> RiskGateResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RiskGateError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> RiskGateResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| RiskGateError::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Configured output format, if set and valid
    pub fn default_format(&self) -> Option<OutputFormat> {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    }

    pub fn set(&mut self, key: &str, value: String) -> RiskGateResult<()> {
        match key {
            "api_key" => self.api_key = Some(value),
            "model" => self.model = Some(value),
            "default_format" => {
                OutputFormat::from_str(&value, true).map_err(RiskGateError::Config)?;
                self.default_format = Some(value.to_lowercase());
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Display value for `key`; the API key is masked
    pub fn get(&self, key: &str) -> RiskGateResult<Option<String>> {
        Ok(match key {
            "api_key" => self.api_key.as_deref().map(mask),
            "model" => self.model.clone(),
            "default_format" => self.default_format.clone(),
            _ => return Err(unknown_key(key)),
        })
    }

    fn config_path(profile: Option<&str>) -> RiskGateResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RiskGateError::Config("Cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".riskgate").join(filename))
    }
}

pub const KEYS: [&str; 3] = ["api_key", "model", "default_format"];

fn unknown_key(key: &str) -> RiskGateError {
    RiskGateError::Config(format!("Unknown config key: {}", key))
}

fn mask(key: &str) -> String {
    let head: String = key.chars().take(4).collect();
    format!("{}****", head)
}
