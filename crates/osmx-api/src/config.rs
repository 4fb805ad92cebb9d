use std::env;
use std::path::PathBuf;

use osmx_core::config::LayeredConfig;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    /// Single allowed origin; `None` allows any origin
    pub cors_origin: Option<String>,
    pub static_dir: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_origin: None,
            static_dir: PathBuf::from("public"),
            config_file: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origin = env::var("OSMX_CORS_ORIGIN").ok().filter(|o| !o.is_empty() && o != "*");

        let static_dir =
            env::var("OSMX_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir);

        let config_file = env::var("OSMX_CONFIG").ok().map(PathBuf::from);

        Self {
            port,
            cors_origin,
            static_dir,
            config_file,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Upstream configuration: defaults, then the optional file, then environment
    pub fn upstream_config(&self) -> osmx_core::Result<LayeredConfig> {
        let config = LayeredConfig::with_defaults();
        let config = match &self.config_file {
            Some(path) => config.load_from_file(path)?,
            None => config,
        };
        Ok(config.load_from_env())
    }
}
