use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

/// Message returned when a search is missing its country or tags
pub const MISSING_PARAMS_MESSAGE: &str = "Country and tags are required";

/// Message returned when the country is not a two-letter code
pub const INVALID_COUNTRY_MESSAGE: &str = "Country must be an ISO 3166-1 alpha-2 code";

/// A validated search over one country, optionally narrowed to a locality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// ISO 3166-1 alpha-2 code, upper-cased
    pub country: String,

    /// Free-text locality name, kept exactly as the caller typed it
    pub area: Option<String>,

    /// Feature tag keys to select, in request order (never empty)
    pub tags: Vec<String>,
}

impl SearchRequest {
    /// Create a request from already-split values
    pub fn new(
        country: impl Into<String>,
        area: Option<String>,
        tags: Vec<String>,
    ) -> Result<Self> {
        let country = country.into();
        if country.trim().is_empty() || tags.is_empty() {
            return Err(ExplorerError::Validation(MISSING_PARAMS_MESSAGE.to_string()));
        }

        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ExplorerError::Validation(INVALID_COUNTRY_MESSAGE.to_string()));
        }

        Ok(Self {
            country: country.to_ascii_uppercase(),
            area: area.filter(|a| !a.trim().is_empty()),
            tags,
        })
    }

    /// Create a request from raw query-string values
    ///
    /// Empty strings count as missing, and `tags` is a comma-separated list.
    pub fn from_params(
        country: Option<&str>,
        area: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Self> {
        let tags = tags.map(split_tags).unwrap_or_default();
        Self::new(country.unwrap_or_default(), area.map(str::to_string), tags)
    }

    /// Whether the search is narrowed to a named locality
    pub fn is_area_scoped(&self) -> bool {
        self.area.is_some()
    }
}

/// Split a comma-separated tag list, dropping blank entries
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Latitude/longitude rectangle in degrees
///
/// Values are trusted as returned by the boundary lookup; `south < north` and
/// `west < east` are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self { south, north, west, east }
    }
}
