// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::config::AnalysisConfig;
use crate::utils;

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub data_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: String,
    pub analysis: AnalysisConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/jobs_data.csv"),
            log_path: PathBuf::from("/tmp/job-analytics.log"),
            log_level: "info".to_string(),
            analysis: AnalysisConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration for the active environment from `config.yaml` in
    /// the working directory, or built-in defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), &Self::get_environment())
    }

    pub fn get_environment() -> String {
        std::env::var("JOB_ANALYTICS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from(config_path: &Path, environment: &str) -> Result<Self> {
        let env_config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        Ok(Self {
            data_path: utils::resolve_path(&env_config.data_path)?,
            log_path: utils::resolve_path(&env_config.log_path)?,
            ..env_config
        })
    }

    /// Pick the section for `environment`; anything but "production" is local.
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Logged once the subscriber is up, since loading happens before it.
    pub fn log_summary(&self, environment: &str) {
        app_log!(info, "Environment: {}", environment);
        app_log!(info, "Data file: {}", self.data_path.display());
        app_log!(info, "Log file: {}", self.log_path.display());
    }
}
