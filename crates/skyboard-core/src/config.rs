use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// OpenWeatherMap 2.5 API root
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Cities loaded on startup when the config does not override them
pub const DEFAULT_CITIES: [&str; 5] = ["Dubai", "New York", "London", "Tokyo", "Sydney"];

/// Environment variable that takes precedence over `weather.api_key`
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

const APP_DIR: &str = "skyboard";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Dashboard startup settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Local persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API root, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key (the environment variable wins when set)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Key given on the command line; never written to the config file
    #[serde(skip)]
    pub api_key_override: Option<String>,

    /// Per-request timeout; unset leaves the HTTP client default in place
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_override: None,
            request_timeout_secs: None,
        }
    }
}

impl WeatherConfig {
    /// Resolve the API key: command line, then environment, then config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key_override.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Cities fetched in parallel when the dashboard starts
    #[serde(default = "default_cities")]
    pub default_cities: Vec<String>,
}

fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_cities: default_cities(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding favorites; defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured data directory, or `<data_dir>/skyboard`.
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }
}

/// Settings given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    /// Replaces `dashboard.default_cities` when non-empty
    pub cities: Vec<String>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration, apply `overrides`, then validate the result
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated(
        path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<(Self, ValidationResult)> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply(overrides);
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if overrides.api_key.is_some() {
            self.weather.api_key_override = overrides.api_key;
        }
        if !overrides.cities.is_empty() {
            self.dashboard.default_cities = overrides.cities;
        }
        if overrides.data_dir.is_some() {
            self.storage.data_dir = overrides.data_dir;
        }
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.resolve_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "No API key configured; set {} or weather.api_key",
                    API_KEY_ENV
                ),
            );
        }

        if self.weather.request_timeout_secs == Some(0) {
            result.add_error(
                "weather.request_timeout_secs",
                "Timeout must be greater than 0",
            );
        }

        if self.dashboard.default_cities.is_empty() {
            result.add_warning(
                "dashboard.default_cities",
                "No default cities; the dashboard will start empty",
            );
        }

        for (i, city) in self.dashboard.default_cities.iter().enumerate() {
            if city.trim().is_empty() {
                result.add_error(
                    format!("dashboard.default_cities[{}]", i),
                    "City name cannot be blank",
                );
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// `<config_dir>/skyboard/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_default_cities() {
        let config = Config::default();
        assert_eq!(
            config.dashboard.default_cities,
            vec!["Dubai", "New York", "London", "Tokyo", "Sydney"]
        );
        assert_eq!(config.weather.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://api.openweathermap.org".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_blank_default_city_is_error() {
        let mut config = Config::default();
        config.dashboard.default_cities.push("   ".to_string());
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "dashboard.default_cities[5]"));
    }

    #[test]
    fn test_empty_default_cities_is_warning() {
        let mut config = Config::default();
        config.dashboard.default_cities.clear();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "dashboard.default_cities"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.weather.request_timeout_secs = Some(0);
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_configured_api_key_suppresses_warning() {
        let mut config = Config::default();
        config.weather.api_key = Some("abc123".to_string());
        let result = config.validate();
        assert!(!result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_cli_key_silences_missing_key_warning() {
        let mut config = Config::default();
        config.apply(ConfigOverrides {
            api_key: Some("from-cli".to_string()),
            ..Default::default()
        });

        assert_eq!(config.weather.resolve_api_key().as_deref(), Some("from-cli"));
        assert!(!config
            .validate()
            .warnings
            .iter()
            .any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_overrides_replace_cities_and_data_dir() {
        let mut config = Config::default();
        config.apply(ConfigOverrides {
            cities: vec!["Lima".to_string()],
            data_dir: Some(PathBuf::from("/tmp/skyboard-test")),
            ..Default::default()
        });

        assert_eq!(config.dashboard.default_cities, vec!["Lima"]);
        assert_eq!(
            config.storage.effective_data_dir(),
            PathBuf::from("/tmp/skyboard-test")
        );
        assert!(config.weather.api_key_override.is_none());
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config = Config::default();
        config.apply(ConfigOverrides::default());
        assert_eq!(config.dashboard.default_cities.len(), 5);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_load_validated_applies_overrides_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\ndefault_cities = [\"  \"]\n").unwrap();

        // The blank city in the file would fail validation on its own
        assert!(Config::load_validated(Some(&path), ConfigOverrides::default()).is_err());

        let overrides = ConfigOverrides {
            cities: vec!["Quito".to_string()],
            ..Default::default()
        };
        let (config, _) = Config::load_validated(Some(&path), overrides).unwrap();
        assert_eq!(config.dashboard.default_cities, vec!["Quito"]);
    }

    #[test]
    fn test_cli_key_not_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.weather.api_key_override = Some("secret-cli-key".to_string());

        config.save_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("secret-cli-key"));
    }

    #[test]
    fn test_load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.dashboard.default_cities.len(), 5);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[dashboard]\ndefault_cities = [\"Paris\"]\n\n[weather]\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dashboard.default_cities, vec!["Paris"]);
        assert_eq!(config.weather.request_timeout_secs, Some(5));
        assert_eq!(config.weather.base_url, DEFAULT_BASE_URL);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nbase_url = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
