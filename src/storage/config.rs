//! JSON Configuration Management
//!
//! Handles reading and writing the engine configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use biographer_knowledge::KnowledgeBase;
use tracing::{debug, info};

use crate::models::settings::BiographerConfig;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Environment variable overriding `provider.api_key`
pub const API_KEY_ENV: &str = "BIOGRAPHER_API_KEY";

/// Configuration service for managing engine settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: BiographerConfig,
}

impl ConfigService {
    /// Load ~/.biographer/config.json, creating it with defaults when absent
    pub fn new() -> AppResult<Self> {
        Self::from_path(config_path()?)
    }

    /// Load an explicit config file, creating it with defaults when absent
    pub fn from_path(path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = path.into();
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            if let Some(parent) = config_path.parent() {
                ensure_dir(parent)?;
            }
            let default_config = BiographerConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            debug!(path = %config_path.display(), "Created default config");
            default_config
        };

        apply_api_key_override(&mut config, std::env::var(API_KEY_ENV).ok());

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<BiographerConfig> {
        let content = fs::read_to_string(path)?;
        let config: BiographerConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &BiographerConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &BiographerConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> BiographerConfig {
        self.config.clone()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Tables named by `knowledge_path`, else the built-in ones
    pub fn knowledge_base(&self) -> AppResult<KnowledgeBase> {
        match &self.config.knowledge_path {
            Some(path) => {
                let kb = KnowledgeBase::load(path)?;
                info!(path = %path.display(), gothras = kb.tables().gothras.len(), "Loaded knowledge tables");
                Ok(kb)
            }
            None => Ok(KnowledgeBase::builtin()),
        }
    }
}

/// A non-empty key from the environment wins over the file
fn apply_api_key_override(config: &mut BiographerConfig, env_key: Option<String>) {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        config.provider.api_key = Some(key);
    }
}
