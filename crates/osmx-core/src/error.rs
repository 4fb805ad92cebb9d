//! Error types for OSM Explorer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    // Request errors
    #[error("{0}")]
    Validation(String),

    // Lookup errors
    #[error("No boundary data found for country: {country}")]
    NotFound { country: String },

    // Upstream service errors
    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExplorerError {
    /// Build an upstream error that carries no response details
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Text for response envelopes; upstream failures drop the service prefix
    pub fn client_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw response body returned by the upstream service, if any
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_country() {
        let err = ExplorerError::NotFound { country: "XX".to_string() };
        assert_eq!(err.to_string(), "No boundary data found for country: XX");
    }

    #[test]
    fn test_upstream_body_only_for_upstream_errors() {
        let err = ExplorerError::Upstream {
            service: "overpass",
            message: "HTTP 504".to_string(),
            status: Some(504),
            body: Some("runtime error".to_string()),
        };
        assert_eq!(err.upstream_body(), Some("runtime error"));
        assert_eq!(err.to_string(), "overpass request failed: HTTP 504");

        let err = ExplorerError::Validation("bad".to_string());
        assert!(err.upstream_body().is_none());
    }

    #[test]
    fn test_client_message_drops_service_prefix() {
        let err = ExplorerError::upstream("overpass", "Request failed with status code 504");
        assert_eq!(err.client_message(), "Request failed with status code 504");

        let err = ExplorerError::NotFound { country: "XX".to_string() };
        assert_eq!(err.client_message(), "No boundary data found for country: XX");
    }
}
