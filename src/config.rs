use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from
/// `.license-collectr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Source-detection settings.
    #[serde(default)]
    pub detector: DetectorConfig,
}

/// Knobs for the external detection pipeline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Command used to stage package sources.
    pub stage_command: String,
    /// Command used to scan a staged source tree.
    pub detector_command: String,
    /// Per-package detection timeout in seconds.
    pub timeout_secs: u64,
    /// How many packages are staged and scanned concurrently.
    pub batch_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            stage_command: "spack".to_string(),
            detector_command: "license-detector".to_string(),
            timeout_secs: 300,
            batch_size: 16,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.license-collectr/config.toml`
/// 3. `~/.config/license-collectr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".license-collectr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-collectr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
