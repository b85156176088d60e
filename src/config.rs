use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

use crate::config_manager::utils::read_config_text;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sessions untouched for this long are forgotten.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Secrets file consulted first for the API key.
    #[serde(default = "default_secrets_file")]
    pub secrets_file: String,
    /// Key name looked up in the secrets file.
    #[serde(default = "default_api_key_name")]
    pub api_key_name: String,
    /// Environment variable used when the secrets file has no key.
    #[serde(default = "default_api_key_name")]
    pub api_key_env: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Parent of the per-process scoped directory holding generated PDFs.
    #[serde(default = "default_export_dir")]
    pub dir: String,
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_frontend_dir() -> String {
    "static".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_secs() -> u64 {
    3600
}

fn default_model() -> String {
    "gemini-2.5-flash-lite-preview-06-17".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_secrets_file() -> String {
    ".streamlit/secrets.toml".to_string()
}

fn default_api_key_name() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_export_dir() -> String {
    std::env::temp_dir()
        .join("professor-lectures")
        .to_string_lossy()
        .into_owned()
}

fn default_retention_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generation: GenerationConfig::default(),
            export: ExportConfig::default(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            secrets_file: default_secrets_file(),
            api_key_name: default_api_key_name(),
            api_key_env: default_api_key_name(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            retention_secs: default_retention_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Load a YAML or JSON config file, chosen by extension.
    pub fn load(path: &str) -> Result<Self> {
        let content = read_config_text(path)?;

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Load the first config file that exists among the candidates. When none
    /// exists the built-in defaults are used and `None` is returned as the path.
    pub fn discover(candidates: &[String]) -> Result<(Self, Option<String>)> {
        for path in candidates {
            if Path::new(path).exists() {
                let config = Self::load(path)
                    .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path, e))?;
                return Ok((config, Some(path.clone())));
            }
            tracing::debug!("No config file at {}", path);
        }
        Ok((Self::default(), None))
    }

    pub fn candidate_paths() -> Vec<String> {
        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.yml".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
