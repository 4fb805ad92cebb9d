use chrono::{SecondsFormat, Utc};
use osmx_core::models::{split_tags, GeoElement};
use osmx_core::SearchOutcome;
use serde::Serialize;

use super::SearchParams;

/// Current time as RFC 3339 UTC with milliseconds
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Successful `/search` response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    pub debug: SearchDebug,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    pub elements: Vec<GeoElement>,
}

impl SearchResponse {
    pub fn from_outcome(outcome: SearchOutcome, area: Option<String>, tags: Vec<String>) -> Self {
        if outcome.is_empty() {
            return Self {
                success: true,
                message: "No results found".to_string(),
                debug: SearchDebug {
                    area,
                    tags,
                    result_count: None,
                    timestamp: timestamp(),
                },
                version: None,
                generator: None,
                elements: Vec::new(),
            };
        }

        let count = outcome.elements.len();
        Self {
            success: true,
            message: format!("Found {} results", count),
            debug: SearchDebug {
                area,
                tags,
                result_count: Some(count),
                timestamp: timestamp(),
            },
            version: outcome.version,
            generator: outcome.generator,
            elements: outcome.elements,
        }
    }
}

/// Echo of the search parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDebug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
    pub timestamp: String,
}

/// Debug block attached to a failed search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchErrorDebug {
    pub search_params: SearchParamsEcho,
    pub error_timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SearchParamsEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SearchErrorDebug {
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            search_params: SearchParamsEcho {
                country: params.country.clone(),
                area: params.area.clone(),
                tags: params.tags.as_deref().map(split_tags),
            },
            error_timestamp: timestamp(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "osmx-api" }
    }
}
