use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Service configuration: where the catalog and snapshot live, and how
/// often the registry is flushed to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub catalog_path: String,
    pub data_path: String,
    pub save_interval_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/cards.json".into(),
            data_path: "data/fateweaver.json".into(),
            save_interval_secs: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    catalog_path: Option<String>,
    #[serde(default)]
    data_path: Option<String>,
    #[serde(default)]
    save_interval_secs: Option<u64>,
}

/// Resolve configuration: defaults, then the TOML file named by
/// `FATEWEAVER_CONFIG` (if set), then per-field env overrides.
pub fn load() -> Result<BotConfig, ConfigError> {
    let mut cfg = BotConfig::default();

    if let Ok(path) = std::env::var("FATEWEAVER_CONFIG") {
        let raw = fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&raw)?;
        if let Some(v) = file.catalog_path {
            cfg.catalog_path = v;
        }
        if let Some(v) = file.data_path {
            cfg.data_path = v;
        }
        if let Some(v) = file.save_interval_secs {
            cfg.save_interval_secs = v;
        }
    }

    if let Ok(v) = std::env::var("FATEWEAVER_CARDS") {
        if !v.is_empty() {
            cfg.catalog_path = v;
        }
    }
    if let Ok(v) = std::env::var("FATEWEAVER_DATA") {
        if !v.is_empty() {
            cfg.data_path = v;
        }
    }
    if let Ok(v) = std::env::var("FATEWEAVER_SAVE_INTERVAL") {
        if !v.is_empty() {
            cfg.save_interval_secs = v
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid save interval".into()))?;
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &BotConfig) -> Result<(), ConfigError> {
    if cfg.save_interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_interval_secs must be >=1".into(),
        ));
    }
    if cfg.catalog_path.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: catalog_path must not be empty".into(),
        ));
    }
    if cfg.data_path.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: data_path must not be empty".into(),
        ));
    }
    Ok(())
}
