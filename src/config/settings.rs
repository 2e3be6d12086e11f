use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::ScanConfig;

/// Loads a scan configuration from a JSON file.
///
/// Unlike the ignore file, a config file is named explicitly by the user, so
/// a missing or malformed file is an error rather than a silent default.
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: ScanConfig = serde_json::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Saves the provided configuration as pretty-printed JSON.
pub fn save_config(config: &ScanConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(path, config_json)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    tracing::info!("Saved config to {:?}", path);
    Ok(())
}
