use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;

/// Read a config file, decode it and substitute `${VAR_NAME}` placeholders
/// from the environment. Unknown variables are left as written.
pub fn read_config_text(config_path: &str) -> Result<String> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    Ok(substitute_env_vars(&content))
}

pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Decode as UTF-8 (BOM stripped), falling back to GBK for legacy files.
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let mut bytes = fs::read(file_path)?;
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(0..3);
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let (cow, _, had_errors) = encoding_rs::GBK.decode(err.as_bytes());
            if had_errors {
                tracing::warn!("Config file {} is neither UTF-8 nor GBK; some characters were replaced", file_path);
            }
            Ok(cow.into_owned())
        }
    }
}
