//! Dashboard config file handling.

use anyhow::{Context, Result};
use shared::DashboardConfig;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_PATH: &str = ".stock-dashboard.toml";

/// Overrides `api.base_url` from the config file when set.
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

/// Read the config at `path`, creating a default one when missing.
///
/// Values repaired by `validate_and_fix` are written back so the file stays
/// in sync with what the frontend receives.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        let mut config = DashboardConfig::default();
        config.validate_and_fix();
        save_config_to_file(path, &config).context("Failed to create default config")?;
        log::info!("Created default config at {}", path.display());
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut config = DashboardConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    let warnings = config.validate_and_fix();
    if !warnings.is_empty() {
        for warning in &warnings {
            log::warn!("{warning}");
        }
        if let Err(error) = save_config_to_file(path, &config) {
            // Keep serving the repaired in-memory config
            log::warn!("{error:#}");
        }
    }
    Ok(config)
}

pub fn apply_env_override(config: DashboardConfig, api_url: Option<String>) -> DashboardConfig {
    let api_url = api_url.filter(|url| !url.trim().is_empty());
    if let Some(url) = &api_url {
        log::info!("Using data API from {API_URL_ENV}: {url}");
    }
    config.with_base_url_override(api_url)
}

pub fn save_config_to_file(path: &Path, config: &DashboardConfig) -> Result<()> {
    let toml_content = config.to_toml_string()?;

    let content_with_header = format!(
        "# Stock Dashboard Configuration\n\
         # api.base_url is the data API used by every widget\n\
         \n\
         {}",
        toml_content
    );

    fs::write(path, content_with_header)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}
