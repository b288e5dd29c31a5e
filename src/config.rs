use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use recetapp_core::DEFAULT_BASE_URL;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding favorites, fridges and theme
    pub data_dir: ConfigValue<PathBuf>,
    /// Base URL of the recipe service
    pub api_base_url: ConfigValue<String>,
    /// Quiet period before a search is sent, in milliseconds
    pub search_debounce_ms: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    api_base_url: Option<String>,
    search_debounce_ms: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut api_base_url =
            ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut search_debounce_ms = ConfigValue::new(500, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(url) = file_config.api_base_url {
                api_base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(ms) = file_config.search_debounce_ms {
                search_debounce_ms = ConfigValue::new(ms, ConfigSource::File);
            }
        }

        if let Ok(dir) = std::env::var("RECETAPP_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("RECETAPP_API_URL") {
            api_base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(ms) = std::env::var("RECETAPP_SEARCH_DEBOUNCE_MS") {
            let ms = ms
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECETAPP_SEARCH_DEBOUNCE_MS", ms))?;
            search_debounce_ms = ConfigValue::new(ms, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            api_base_url,
            search_debounce_ms,
            config_file,
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.value)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/recetapp/
    /// - macOS: ~/Library/Application Support/recetapp/
    /// - Windows: %APPDATA%/recetapp/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recetapp")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/recetapp/
    /// - macOS: ~/Library/Application Support/recetapp/
    /// - Windows: %APPDATA%/recetapp/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recetapp")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.value.ends_with("recetapp"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.api_base_url.value, DEFAULT_BASE_URL);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/recetapp").unwrap();
        writeln!(file, "api_base_url: http://localhost:9000/api/").unwrap();
        writeln!(file, "search_debounce_ms: 250").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/recetapp"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.api_base_url.value, "http://localhost:9000/api/");
        assert_eq!(config.search_debounce_ms.value, 250);
        assert_eq!(config.search_debounce_ms.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: data").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_base_url: http://fromfile/").unwrap();

        std::env::set_var("RECETAPP_API_URL", "http://fromenv/");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_base_url.value, "http://fromenv/");
        assert_eq!(config.api_base_url.source, ConfigSource::Environment);

        std::env::remove_var("RECETAPP_API_URL");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "search_debounce_ms: 800").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.api_base_url.source, ConfigSource::Default);
        assert_eq!(config.search_debounce_ms.value, 800);
    }
}
