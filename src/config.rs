//! Run configuration: optional config file plus CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "rdex";
const CONFIG_FILE: &str = "config.json";

/// Extension of descriptor documents when none is configured.
pub const DEFAULT_EXTENSION: &str = "rd";

/// Defaults that can be stored in the platform config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Directory holding the descriptor corpus
    #[serde(default)]
    pub inputs_dir: Option<PathBuf>,

    /// Base URL for cross-reference targets (no trailing slash)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Descriptor file extension
    #[serde(default)]
    pub extension: Option<String>,
}

impl ConfigFile {
    /// Load the config file from the platform config directory, or
    /// return defaults if there is none.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load an explicitly named config file; here, a missing file is an
    /// error rather than a default.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Path of the per-user config file, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub inputs_dir: PathBuf,
    pub base_url: String,
    pub extension: String,
}

impl Settings {
    /// Merge CLI values over config-file values and validate. Fails
    /// before any scanning when the corpus location or link base is
    /// unavailable.
    pub fn resolve(
        inputs_dir: Option<PathBuf>,
        base_url: Option<String>,
        extension: Option<String>,
        file: ConfigFile,
    ) -> Result<Self> {
        let Some(inputs_dir) = inputs_dir.or(file.inputs_dir) else {
            bail!("no inputs directory configured; pass --inputs-dir or set inputs_dir in the config file");
        };
        let Some(base_url) = base_url.or(file.base_url) else {
            bail!("no base URL configured; pass --base-url or set base_url in the config file");
        };
        let extension = extension
            .or(file.extension)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        if !inputs_dir.is_dir() {
            bail!("inputs directory {} does not exist", inputs_dir.display());
        }

        Ok(Self {
            inputs_dir,
            base_url,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_dir() -> PathBuf {
        std::env::temp_dir()
    }

    #[test]
    fn test_config_file_partial_json() {
        let json = r#"{"base_url": "http://example.org/rds"}"#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://example.org/rds"));
        assert!(config.inputs_dir.is_none());
        assert!(config.extension.is_none());
    }

    #[test]
    fn test_config_file_empty_json() {
        let config: ConfigFile = serde_json::from_str("{}").unwrap();
        assert!(config.inputs_dir.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ConfigFile {
            inputs_dir: Some(PathBuf::from("/nonexistent/from-file")),
            base_url: Some("http://file.example".to_string()),
            extension: Some("xml".to_string()),
        };

        let settings = Settings::resolve(
            Some(existing_dir()),
            Some("http://cli.example".to_string()),
            None,
            file,
        )
        .unwrap();

        assert_eq!(settings.inputs_dir, existing_dir());
        assert_eq!(settings.base_url, "http://cli.example");
        assert_eq!(settings.extension, "xml");
    }

    #[test]
    fn test_missing_inputs_dir_is_fatal() {
        let err = Settings::resolve(
            None,
            Some("http://example.org".to_string()),
            None,
            ConfigFile::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("inputs directory"));
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        let err =
            Settings::resolve(Some(existing_dir()), None, None, ConfigFile::default()).unwrap_err();

        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_nonexistent_inputs_dir_is_fatal() {
        let err = Settings::resolve(
            Some(PathBuf::from("/nonexistent/rdex-inputs")),
            Some("http://example.org".to_string()),
            None,
            ConfigFile::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_extension_defaults_to_rd() {
        let settings = Settings::resolve(
            Some(existing_dir()),
            Some("http://example.org".to_string()),
            None,
            ConfigFile::default(),
        )
        .unwrap();

        assert_eq!(settings.extension, "rd");
    }
}
