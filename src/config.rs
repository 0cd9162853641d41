use crate::client::parse_base_url;
use crate::error::{DiscoveryError, ErrorContext, Result};
use crate::types::Config;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "DOMAIN_DISCOVERY_API_KEY";
pub const BASE_URL_ENV: &str = "DOMAIN_DISCOVERY_BASE_URL";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    proxy: Option<String>,
}

/// Loads the TOML file if it exists, then applies environment overrides.
pub fn load_config(config_path_str: &str) -> Result<Config> {
    let mut config = Config::default();

    if Path::new(config_path_str).exists() {
        let contents = fs::read_to_string(config_path_str)
            .with_context(|| format!("Failed to read config file {}", config_path_str))?;
        apply_file(&mut config, &contents)?;
    }

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

fn apply_file(config: &mut Config, contents: &str) -> Result<()> {
    let file: FileConfig = toml::from_str(contents).with_context(|| "Failed to parse config file".to_string())?;

    if let Some(api_key) = file.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(base_url) = file.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = file.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(user_agent) = file.user_agent {
        config.user_agent = user_agent;
    }
    if file.proxy.is_some() {
        config.proxy = file.proxy;
    }

    Ok(())
}

pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |name| env::var(name).ok());
}

fn apply_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        config.api_key = Some(key.trim().to_string());
    }
    if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.timeout.is_zero() {
        return Err(DiscoveryError::Config("Timeout must be greater than 0".to_string()));
    }
    parse_base_url(&config.base_url)?;
    Ok(())
}
