use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_LEVEL, ENV_ID_FIELDS, ENV_LOG_DIR};
use crate::error::{NormalizerError, Result};
use crate::normalize::IdFields;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Replaces the default identifier fields when set
    pub id_fields: Option<Vec<String>>,
    /// Added on top of whichever base set is in effect
    pub extra_id_fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling JSON log; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load `long-ids.toml` from the working directory, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load an explicitly named config file; a missing file is an error
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NormalizerError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `LONG_IDS_FIELDS` and `LONG_IDS_LOG_DIR` from the environment
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_ID_FIELDS).ok(),
            std::env::var(ENV_LOG_DIR).ok(),
        )
    }

    pub fn with_overrides(mut self, id_fields: Option<String>, log_dir: Option<String>) -> Self {
        if let Some(list) = id_fields {
            self.normalizer.id_fields = Some(split_field_list(&list));
        }
        if let Some(dir) = log_dir.filter(|d| !d.trim().is_empty()) {
            self.logging.log_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// The identifier fields in effect after file and environment overrides
    pub fn id_fields(&self) -> IdFields {
        let mut fields = match &self.normalizer.id_fields {
            Some(names) => IdFields::new(names.iter().cloned()),
            None => IdFields::default(),
        };
        fields.extend(self.normalizer.extra_id_fields.iter().cloned());
        fields
    }
}

/// Split a comma-separated field list, dropping blanks
pub fn split_field_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
