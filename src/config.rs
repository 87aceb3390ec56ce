use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::Config;

/// Load the TOML config, falling back to defaults when the file is absent
/// (the server base URL is the only setting and it has a localhost default).
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
