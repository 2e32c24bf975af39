//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::openai::OPENAI_API_BASE;
use crate::params::{validate_image_quality, validate_image_size};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// `OpenAI` endpoint configuration.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Models and image parameters used for every card.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Web form settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// `OpenAI` API key.
    pub openai: Option<String>,
}

/// `OpenAI` endpoint configuration.
#[derive(Debug, Default, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL, e.g. for a proxy or a compatible server.
    pub api_base: Option<String>,
}

/// Model identifiers and image parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Chat model used for the four text prompts.
    pub chat: String,
    /// Image model used for the illustration.
    pub image: String,
    /// Illustration size.
    pub image_size: String,
    /// Illustration quality tier.
    pub image_quality: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: "gpt-3.5-turbo".to_string(),
            image: "dall-e-2".to_string(),
            image_size: "256x256".to_string(),
            image_quality: "standard".to_string(),
        }
    }
}

/// Web form settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: "127.0.0.1:8000".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or names an
    /// unsupported image size or quality.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        validate_image_size(&self.models.image_size)?;
        validate_image_quality(&self.models.image_quality)
    }

    /// Get the `OpenAI` API key, preferring environment variable.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.keys.openai.clone())
    }

    /// Get the `OpenAI` base URL, preferring environment variable.
    #[must_use]
    pub fn openai_api_base(&self) -> String {
        std::env::var("OPENAI_API_BASE")
            .ok()
            .filter(|base| !base.is_empty())
            .or_else(|| self.openai.api_base.clone())
            .unwrap_or_else(|| OPENAI_API_BASE.to_string())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `FLASHCARD_CONFIG` environment variable
/// 3. `~/.config/flashcard/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("FLASHCARD_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/flashcard/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/flashcard/config.toml")
    } else {
        PathBuf::from("flashcard.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.openai.is_none());
        assert!(config.openai.api_base.is_none());
        assert_eq!(config.models.chat, "gpt-3.5-turbo");
        assert_eq!(config.models.image, "dall-e-2");
        assert_eq!(config.models.image_size, "256x256");
        assert_eq!(config.models.image_quality, "standard");
        assert_eq!(config.server.addr, "127.0.0.1:8000");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.models.chat, "gpt-3.5-turbo");
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("flashcard_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
openai = "test-openai-key"

[openai]
api_base = "http://localhost:8080/v1"

[models]
chat = "gpt-4o-mini"
image_size = "512x512"

[server]
addr = "0.0.0.0:3000"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.openai.as_deref(), Some("test-openai-key"));
        assert_eq!(config.openai.api_base.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.models.chat, "gpt-4o-mini");
        assert_eq!(config.models.image_size, "512x512");
        // Unset keys keep their defaults.
        assert_eq!(config.models.image, "dall-e-2");
        assert_eq!(config.models.image_quality, "standard");
        assert_eq!(config.server.addr, "0.0.0.0:3000");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("flashcard_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_rejects_unsupported_image_size() {
        let dir = std::env::temp_dir().join("flashcard_config_size_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[models]\nimage_size = \"300x300\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.contains("Unsupported image size"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn openai_key_from_file() {
        let config = Config {
            keys: KeysConfig { openai: Some("from-file".into()) },
            ..Config::default()
        };

        if std::env::var("OPENAI_API_KEY").is_err() {
            assert_eq!(config.openai_key().as_deref(), Some("from-file"));
        }
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
