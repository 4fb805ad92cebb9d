use crate::error::{ExplorerError, Result};
use crate::query::{AreaMatch, QueryBuilder, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_RESTCOUNTRIES_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_USER_AGENT: &str = "OSM Explorer/1.0";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the upstream services and query building
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub overpass_url: ConfigValue<String>,
    pub nominatim_url: ConfigValue<String>,
    pub restcountries_url: ConfigValue<String>,
    pub user_agent: ConfigValue<String>,
    pub query_timeout: ConfigValue<u32>,
    pub area_match: ConfigValue<AreaMatch>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            overpass_url: ConfigValue::new(DEFAULT_OVERPASS_URL.to_string(), ConfigSource::Default),
            nominatim_url: ConfigValue::new(
                DEFAULT_NOMINATIM_URL.to_string(),
                ConfigSource::Default,
            ),
            restcountries_url: ConfigValue::new(
                DEFAULT_RESTCOUNTRIES_URL.to_string(),
                ConfigSource::Default,
            ),
            user_agent: ConfigValue::new(DEFAULT_USER_AGENT.to_string(), ConfigSource::Default),
            query_timeout: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            area_match: ConfigValue::new(AreaMatch::Raw, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ExplorerError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ExplorerError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.overpass_url {
            self.overpass_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.nominatim_url {
            self.nominatim_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.restcountries_url {
            self.restcountries_url.update(url, ConfigSource::File);
        }

        if let Some(user_agent) = file_config.user_agent {
            self.user_agent.update(user_agent, ConfigSource::File);
        }

        if let Some(timeout) = file_config.query_timeout {
            self.query_timeout.update(timeout, ConfigSource::File);
        }

        if let Some(area_match) = file_config.area_match {
            self.area_match.update(area_match, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(url) = env::var("OSMX_OVERPASS_URL") {
            self.overpass_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("OSMX_NOMINATIM_URL") {
            self.nominatim_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("OSMX_RESTCOUNTRIES_URL") {
            self.restcountries_url.update(url, ConfigSource::Environment);
        }

        if let Ok(user_agent) = env::var("OSMX_USER_AGENT") {
            self.user_agent.update(user_agent, ConfigSource::Environment);
        }

        // OSMX_QUERY_TIMEOUT
        if let Ok(timeout_str) = env::var("OSMX_QUERY_TIMEOUT") {
            match parse_query_timeout(&timeout_str) {
                Ok(timeout) => self.query_timeout.update(timeout, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid OSMX_QUERY_TIMEOUT value '{}': expected a positive number of seconds",
                    timeout_str
                ),
            }
        }

        // OSMX_AREA_MATCH
        if let Ok(mode_str) = env::var("OSMX_AREA_MATCH") {
            match parse_area_match(&mode_str) {
                Ok(mode) => self.area_match.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid OSMX_AREA_MATCH value '{}': expected raw or normalized",
                    mode_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.overpass_url {
            self.overpass_url.update(url, ConfigSource::Cli);
        }

        if let Some(url) = overrides.nominatim_url {
            self.nominatim_url.update(url, ConfigSource::Cli);
        }

        if let Some(url) = overrides.restcountries_url {
            self.restcountries_url.update(url, ConfigSource::Cli);
        }

        if let Some(user_agent) = overrides.user_agent {
            self.user_agent.update(user_agent, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.query_timeout {
            self.query_timeout.update(timeout, ConfigSource::Cli);
        }

        if let Some(area_match) = overrides.area_match {
            self.area_match.update(area_match, ConfigSource::Cli);
        }
    }

    /// Query builder configured with the timeout and area matching mode
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new()
            .with_timeout(self.query_timeout.value)
            .with_area_match(self.area_match.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "overpass_url".to_string(),
            (self.overpass_url.value.clone(), self.overpass_url.source),
        );
        map.insert(
            "nominatim_url".to_string(),
            (self.nominatim_url.value.clone(), self.nominatim_url.source),
        );
        map.insert(
            "restcountries_url".to_string(),
            (self.restcountries_url.value.clone(), self.restcountries_url.source),
        );
        map.insert(
            "user_agent".to_string(),
            (self.user_agent.value.clone(), self.user_agent.source),
        );
        map.insert(
            "query_timeout".to_string(),
            (format!("{}s", self.query_timeout.value), self.query_timeout.source),
        );
        map.insert(
            "area_match".to_string(),
            (format!("{:?}", self.area_match.value), self.area_match.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    overpass_url: Option<String>,
    nominatim_url: Option<String>,
    restcountries_url: Option<String>,
    user_agent: Option<String>,
    query_timeout: Option<u32>,
    area_match: Option<AreaMatch>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub overpass_url: Option<String>,
    pub nominatim_url: Option<String>,
    pub restcountries_url: Option<String>,
    pub user_agent: Option<String>,
    pub query_timeout: Option<u32>,
    pub area_match: Option<AreaMatch>,
}

/// Parse a query timeout in seconds
pub fn parse_query_timeout(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ExplorerError::ConfigInvalid {
            key: "query_timeout".to_string(),
            reason: format!("Invalid timeout: {}. Use a positive number of seconds", s),
        }),
    }
}

/// Parse area matching mode from string
pub fn parse_area_match(s: &str) -> Result<AreaMatch> {
    match s.trim().to_lowercase().as_str() {
        "raw" => Ok(AreaMatch::Raw),
        "normalized" | "normalised" => Ok(AreaMatch::Normalized),
        _ => Err(ExplorerError::ConfigInvalid {
            key: "area_match".to_string(),
            reason: format!("Invalid area match mode: {}. Use raw or normalized", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.overpass_url.value, DEFAULT_OVERPASS_URL);
        assert_eq!(config.overpass_url.source, ConfigSource::Default);
        assert_eq!(config.user_agent.value, "OSM Explorer/1.0");
        assert_eq!(config.query_timeout.value, 60);
        assert_eq!(config.area_match.value, AreaMatch::Raw);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
overpass_url = "http://localhost:12345/api/interpreter"
query_timeout = 180
area_match = "normalized"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.overpass_url.value, "http://localhost:12345/api/interpreter");
        assert_eq!(config.overpass_url.source, ConfigSource::File);
        assert_eq!(config.query_timeout.value, 180);
        assert_eq!(config.area_match.value, AreaMatch::Normalized);
        assert_eq!(config.nominatim_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "query_timeout = \"soon\"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ExplorerError::ConfigInvalid { ref key, .. } if key == "file"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            query_timeout: Some(30),
            area_match: Some(AreaMatch::Normalized),
            ..Default::default()
        });

        assert_eq!(config.query_timeout.value, 30);
        assert_eq!(config.query_timeout.source, ConfigSource::Cli);
        assert_eq!(config.area_match.source, ConfigSource::Cli);
        assert_eq!(config.overpass_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides_upstream_identity() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            restcountries_url: Some("http://localhost:9000/v3.1".to_string()),
            user_agent: Some("osmx-test/0.1".to_string()),
            ..Default::default()
        });

        assert_eq!(config.restcountries_url.value, "http://localhost:9000/v3.1");
        assert_eq!(config.restcountries_url.source, ConfigSource::Cli);
        assert_eq!(config.user_agent.value, "osmx-test/0.1");
        assert_eq!(config.user_agent.source, ConfigSource::Cli);
        assert_eq!(config.nominatim_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_query_builder_uses_timeout() {
        let mut config = LayeredConfig::with_defaults();
        config.query_timeout.update(15, ConfigSource::Cli);

        let query = config
            .query_builder()
            .country_query(&crate::models::BoundingBox::new(0.0, 1.0, 0.0, 1.0), &["shop".to_string()]);
        assert!(query.to_string().starts_with("[out:json][timeout:15];"));
    }

    #[test]
    fn test_parse_area_match() {
        assert_eq!(parse_area_match("raw").unwrap(), AreaMatch::Raw);
        assert_eq!(parse_area_match("Normalized").unwrap(), AreaMatch::Normalized);
        assert!(parse_area_match("fuzzy").is_err());
    }

    #[test]
    fn test_parse_query_timeout() {
        assert_eq!(parse_query_timeout("90").unwrap(), 90);
        assert!(parse_query_timeout("0").is_err());
        assert!(parse_query_timeout("-5").is_err());
    }
}
