use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParleyError, Result};

/// Top-level configuration for an embedded Parley widget session.
///
/// Loaded from a TOML file supplied by the host. Each section corresponds
/// to one of the cooperating session concerns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl ParleyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Remote reply endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// URL of the reply endpoint (single POST operation).
    pub endpoint: String,
    /// Identifier sent with every utterance.
    pub user_id: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8600/chat".to_string(),
            user_id: "web-user".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Session and history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage key under which the message sequence is persisted.
    pub storage_key: String,
    /// Name the greeting introduces the assistant as.
    pub assistant_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "chat_history".to_string(),
            assistant_name: "Parley".to_string(),
        }
    }
}

/// Voice capture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// BCP 47 language tag for the platform recognizer.
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParleyConfig::default();
        assert_eq!(config.transport.user_id, "web-user");
        assert_eq!(config.transport.timeout_secs, 30);
        assert_eq!(config.session.storage_key, "chat_history");
        assert_eq!(config.voice.language, "en-US");
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: ParleyConfig = toml::from_str(
            r#"
            [transport]
            endpoint = "https://answers.example.com/chat"
            "#,
        )
        .unwrap();
        assert_eq!(config.transport.endpoint, "https://answers.example.com/chat");
        assert_eq!(config.transport.user_id, "web-user");
        assert_eq!(config.session.assistant_name, "Parley");
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: ParleyConfig = toml::from_str("").unwrap();
        assert_eq!(config.voice.language, "en-US");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");

        let mut config = ParleyConfig::default();
        config.transport.endpoint = "https://bot.example.com/reply".to_string();
        config.session.assistant_name = "Iris".to_string();
        config.save(&path).unwrap();

        let loaded = ParleyConfig::load(&path).unwrap();
        assert_eq!(loaded.transport.endpoint, "https://bot.example.com/reply");
        assert_eq!(loaded.session.assistant_name, "Iris");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = ParleyConfig::load(Path::new("/nonexistent/parley.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = ParleyConfig::load_or_default(Path::new("/nonexistent/parley.toml"));
        assert_eq!(config.transport.user_id, "web-user");
    }

    #[test]
    fn test_load_or_default_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is not { toml").unwrap();

        let config = ParleyConfig::load_or_default(&path);
        assert_eq!(config.session.storage_key, "chat_history");
    }
}
