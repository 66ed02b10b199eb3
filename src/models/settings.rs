//! Settings Models
//!
//! Engine configuration stored in config.json.

use std::path::PathBuf;
use std::time::Duration;

use biographer_llm::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Biographer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiographerConfig {
    /// Oracle provider used for both extraction and response generation
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Deadline for the extraction call
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
    /// Deadline for the response-generation call
    #[serde(default = "default_response_timeout_secs")]
    pub response_timeout_secs: u64,
    /// Extraction should be close to deterministic
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,
    #[serde(default = "default_response_temperature")]
    pub response_temperature: f32,
    /// Optional JSON file replacing the built-in knowledge tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_path: Option<PathBuf>,
    /// Name the interviewer introduces itself with
    #[serde(default = "default_persona_name")]
    pub persona_name: String,
}

fn default_extraction_timeout_secs() -> u64 {
    20
}

fn default_response_timeout_secs() -> u64 {
    30
}

fn default_extraction_temperature() -> f32 {
    0.1
}

fn default_response_temperature() -> f32 {
    0.7
}

fn default_persona_name() -> String {
    "Biographer".to_string()
}

impl Default for BiographerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            extraction_timeout_secs: default_extraction_timeout_secs(),
            response_timeout_secs: default_response_timeout_secs(),
            extraction_temperature: default_extraction_temperature(),
            response_temperature: default_response_temperature(),
            knowledge_path: None,
            persona_name: default_persona_name(),
        }
    }
}

impl BiographerConfig {
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction_timeout_secs == 0 || self.response_timeout_secs == 0 {
            return Err("oracle timeouts must be at least 1 second".to_string());
        }

        for (name, value) in [
            ("extraction_temperature", self.extraction_temperature),
            ("response_temperature", self.response_temperature),
            ("provider.temperature", self.provider.temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} must be between 0 and 2, got {}", name, value));
            }
        }

        if self.provider.model.trim().is_empty() {
            return Err("provider.model cannot be empty".to_string());
        }

        if self.persona_name.trim().is_empty() {
            return Err("persona_name cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BiographerConfig::default();
        assert_eq!(config.extraction_timeout(), Duration::from_secs(20));
        assert_eq!(config.response_timeout(), Duration::from_secs(30));
        assert_eq!(config.persona_name, "Biographer");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BiographerConfig =
            serde_json::from_str(r#"{"extraction_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.extraction_timeout_secs, 5);
        assert_eq!(config.response_timeout_secs, 30);
        assert!((config.extraction_temperature - 0.1).abs() < f32::EPSILON);
        assert!(config.knowledge_path.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = BiographerConfig {
            response_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_temperature_out_of_range() {
        let config = BiographerConfig {
            extraction_temperature: 2.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("extraction_temperature"));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = BiographerConfig::default();
        config.provider.model = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
