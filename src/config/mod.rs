//! Configuration file loading with precedence handling.
//!
//! Precedence, lowest to highest: hardcoded defaults, the TOML config
//! file, environment variables, CLI arguments. The API key is never
//! read from the file; it comes only from the environment.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist or cannot be read.
    #[error("failed to read config file at {path:?}: {reason}")]
    ReadError {
        /// Path that failed to read
        path: PathBuf,
        /// Reason for failure
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("invalid TOML in {path:?}: {reason}")]
    ParseError {
        /// Path with invalid TOML
        path: PathBuf,
        /// Parse error details
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to defaults.
/// Corresponds to `~/.config/ttychat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the conversation files.
    #[serde(default)]
    pub conversations_dir: Option<PathBuf>,

    /// Path for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Model identifier sent with completion requests.
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Prefix before user messages in the conversation pane.
    #[serde(default)]
    pub user_prefix: Option<String>,

    /// Prefix before assistant messages in the conversation pane.
    #[serde(default)]
    pub assistant_prefix: Option<String>,

    /// Display language tag (`en`, `de`, `fr`).
    #[serde(default)]
    pub language: Option<String>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory holding the conversation files.
    pub conversations_dir: PathBuf,
    /// Path for tracing output.
    pub log_file_path: PathBuf,
    /// Model identifier.
    pub model: String,
    /// API base URL.
    pub api_base: String,
    /// User message prefix, `None` meaning the built-in default.
    pub user_prefix: Option<String>,
    /// Assistant message prefix, `None` meaning the built-in default.
    pub assistant_prefix: Option<String>,
    /// Display language tag.
    pub language: String,
}

/// Default model when neither file, env, nor CLI names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of the config file: `~/.config/ttychat/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| home_dir().join(".config"))
        .join("ttychat")
        .join("config.toml")
}

/// Load the config file.
///
/// With an explicit path, a missing or unreadable file is an error.
/// With the default path, a missing file simply yields `None`.
pub fn load_config(explicit: Option<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => (default_config_path(), false),
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    let parsed = toml::from_str(&raw).map_err(|err| ConfigError::ParseError {
        path,
        reason: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Merge the (possibly absent) config file over the hardcoded defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let file = file.unwrap_or_default();
    let base = home_dir().join(".ttychat");
    ResolvedConfig {
        conversations_dir: file
            .conversations_dir
            .unwrap_or_else(|| base.join("conversations")),
        log_file_path: file
            .log_file_path
            .unwrap_or_else(|| base.join("ttychat.log")),
        model: file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_base: file.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        user_prefix: file.user_prefix,
        assistant_prefix: file.assistant_prefix,
        language: file.language.unwrap_or_else(|| "en".to_string()),
    }
}

/// Apply environment variable overrides on top of the merged config.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(model) = std::env::var("TTYCHAT_MODEL") {
        config.model = model;
    }
    if let Ok(api_base) = std::env::var("TTYCHAT_API_BASE") {
        config.api_base = api_base;
    }
    if let Ok(dir) = std::env::var("TTYCHAT_CONVERSATIONS_DIR") {
        config.conversations_dir = PathBuf::from(dir);
    }
    if let Ok(path) = std::env::var("TTYCHAT_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }
    if let Ok(lang) = std::env::var("TTYCHAT_LANG") {
        config.language = lang;
    }
    config
}

/// Apply CLI argument overrides, the highest-precedence layer.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    model: Option<String>,
    conversations_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    language: Option<String>,
) -> ResolvedConfig {
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(dir) = conversations_dir {
        config.conversations_dir = dir;
    }
    if let Some(path) = log_file {
        config.log_file_path = path;
    }
    if let Some(language) = language {
        config.language = language;
    }
    config
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn merge_without_file_uses_defaults() {
        let config = merge_config(None);

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.language, "en");
        assert!(config
            .conversations_dir
            .ends_with(".ttychat/conversations"));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = ConfigFile {
            model: Some("gpt-4o".to_string()),
            language: Some("de".to_string()),
            ..ConfigFile::default()
        };

        let config = merge_config(Some(file));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.language, "de");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let result: Result<ConfigFile, _> = toml::from_str("surprise = true");
        assert!(result.is_err());
    }

    #[test]
    fn parse_accepts_partial_file() {
        let file: ConfigFile = toml::from_str("model = \"local-llm\"").unwrap();
        assert_eq!(file.model.as_deref(), Some("local-llm"));
        assert_eq!(file.conversations_dir, None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_config(Some(PathBuf::from("/nonexistent/ttychat.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn explicit_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = [not toml").unwrap();

        let result = load_config(Some(path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn explicit_valid_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = \"m\"\nlanguage = \"fr\"").unwrap();

        let file = load_config(Some(path)).unwrap().unwrap();
        assert_eq!(file.model.as_deref(), Some("m"));
        assert_eq!(file.language.as_deref(), Some("fr"));
    }

    #[test]
    #[serial(ttychat_env)]
    fn env_overrides_file_values() {
        std::env::set_var("TTYCHAT_MODEL", "env-model");

        let config = apply_env_overrides(merge_config(Some(ConfigFile {
            model: Some("file-model".to_string()),
            ..ConfigFile::default()
        })));

        assert_eq!(config.model, "env-model");
        std::env::remove_var("TTYCHAT_MODEL");
    }

    #[test]
    #[serial(ttychat_env)]
    fn cli_overrides_env_values() {
        std::env::set_var("TTYCHAT_MODEL", "env-model");

        let config = apply_cli_overrides(
            apply_env_overrides(merge_config(None)),
            Some("cli-model".to_string()),
            None,
            None,
            None,
        );

        assert_eq!(config.model, "cli-model");
        std::env::remove_var("TTYCHAT_MODEL");
    }

    #[test]
    #[serial(ttychat_env)]
    fn cli_none_keeps_lower_layers() {
        std::env::remove_var("TTYCHAT_MODEL");
        let config = apply_cli_overrides(merge_config(None), None, None, None, None);
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
