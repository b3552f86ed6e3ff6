use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "WILDMAP_CONFIG";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "WILDMAP_PORT";

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

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener and static assets
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the annotation collections live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Forecast and air-quality endpoints
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Place search endpoint
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,

    /// Fixed device position used by "use my location".
    /// Absent means geolocation is unavailable.
    #[serde(default)]
    pub location: Option<LocationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the frontend bundle
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `animals.json` and `trees.json`
    pub data_dir: PathBuf,
    /// Request timeout when entries go to a remote Wildmap server
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    pub search_url: String,
    /// Contact address sent with every search, required by the provider's usage policy
    pub contact_email: String,
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            search_url: "https://nominatim.openstreetmap.org/search".to_string(),
            contact_email: "wildmap@example.org".to_string(),
            user_agent: concat!("Wildmap/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: 52.507259,
            center_longitude: 13.329013,
            zoom: 13,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path, writing defaults there when missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
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

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(PORT_ENV) {
            match raw.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Using port {} from {}", port, PORT_ENV);
                    self.server.port = port;
                }
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", PORT_ENV, raw),
            }
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        if !self.server.static_dir.is_dir() {
            result.add_warning(
                "server.static_dir",
                format!(
                    "Static directory does not exist: {}",
                    self.server.static_dir.display()
                ),
            );
        }

        if self.storage.data_dir.exists() && !self.storage.data_dir.is_dir() {
            result.add_error(
                "storage.data_dir",
                format!(
                    "Path is not a directory: {}",
                    self.storage.data_dir.display()
                ),
            );
        }

        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);
        self.validate_url(
            &self.weather.air_quality_url,
            "weather.air_quality_url",
            &mut result,
        );
        self.validate_url(&self.geocode.search_url, "geocode.search_url", &mut result);

        if self.geocode.contact_email.trim().is_empty() {
            result.add_error(
                "geocode.contact_email",
                "A contact address is required for place search",
            );
        }

        if self.weather.timeout_secs == 0
            || self.geocode.timeout_secs == 0
            || self.storage.timeout_secs == 0
        {
            result.add_warning("timeout_secs", "A zero timeout disables request timeouts");
        }

        if !(-90.0..=90.0).contains(&self.map.center_latitude)
            || !(-180.0..=180.0).contains(&self.map.center_longitude)
        {
            result.add_error("map", "Map center is outside valid coordinate ranges");
        }

        match &self.location {
            None => result.add_warning(
                "location",
                "No device location configured - \"use my location\" will be unavailable",
            ),
            Some(loc)
                if !(-90.0..=90.0).contains(&loc.latitude)
                    || !(-180.0..=180.0).contains(&loc.longitude) =>
            {
                result.add_error("location", "Location is outside valid coordinate ranges");
            }
            Some(_) => {}
        }

        result
    }

    /// Validate a URL field
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

    /// Save configuration to file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(explicit));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wildmap");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_errors() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_location_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.forecast_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.forecast_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.geocode.search_url = "ftp://nominatim.example".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_port_is_error() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "server.port"));
    }

    #[test]
    fn test_empty_contact_email_is_error() {
        let mut config = Config::default();
        config.geocode.contact_email = "   ".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "geocode.contact_email"));
    }

    #[test]
    fn test_out_of_range_location_is_error() {
        let mut config = Config::default();
        config.location = Some(LocationConfig {
            latitude: 91.0,
            longitude: 0.0,
        });
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location"));
    }

    #[test]
    fn test_load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3000);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.map.zoom, 13);
        assert_eq!(reloaded.geocode.contact_email, config.geocode.contact_email);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 8080\nstatic_dir = \"public\"\n\n[location]\nlatitude = 1.5\nlongitude = 2.5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.storage.timeout_secs, 10);
        let loc = config.location.unwrap();
        assert_eq!(loc.latitude, 1.5);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
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
