use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::ConfigurationError;

/// The model API key. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolve the API key: the secrets file wins, the environment variable is
/// the fallback. Missing both is fatal.
pub fn resolve_api_key(config: &GenerationConfig) -> Result<ApiKey, ConfigurationError> {
    if let Some(key) = read_secrets_file(Path::new(&config.secrets_file), &config.api_key_name)? {
        info!("Using API key from secrets file {}", config.secrets_file);
        return Ok(key);
    }

    match std::env::var(&config.api_key_env) {
        Ok(value) if !value.trim().is_empty() => {
            info!("Using API key from environment variable {}", config.api_key_env);
            Ok(ApiKey::new(value.trim()))
        }
        _ => Err(ConfigurationError::MissingApiKey {
            key: config.api_key_name.clone(),
            secrets_file: config.secrets_file.clone(),
            env_var: config.api_key_env.clone(),
        }),
    }
}

fn read_secrets_file(path: &Path, key: &str) -> Result<Option<ApiKey>, ConfigurationError> {
    if !path.exists() {
        debug!("No secrets file at {}", path.display());
        return Ok(None);
    }

    let secrets_error = |message: String| ConfigurationError::Secrets {
        path: path.display().to_string(),
        message,
    };

    let table: HashMap<String, serde_json::Value> = ::config::Config::builder()
        .add_source(::config::File::from(path))
        .build()
        .and_then(|secrets| secrets.try_deserialize())
        .map_err(|e| secrets_error(e.to_string()))?;

    // Key case is not significant: the loader may normalise it.
    Ok(table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .and_then(|(_, value)| value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ApiKey::new))
}
