use async_trait::async_trait;
use osmx_core::models::BoundingBox;
use osmx_core::ports::BoundaryLookup;
use osmx_core::{ExplorerError, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::http::{build_client, fetch_json, join_url};

const SERVICE: &str = "nominatim";

/// Nominatim boundary lookup
pub struct NominatimClient {
    /// Base URL (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    client: reqwest::Client,
}

impl NominatimClient {
    /// Create a client with its own connection pool
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self::with_client(build_client(user_agent)?, base_url))
    }

    /// Create a client on an existing connection pool
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BoundaryLookup for NominatimClient {
    async fn resolve_bounds(&self, country: &str) -> Result<BoundingBox> {
        tracing::debug!(country = %country, "Fetching country boundaries");

        let request = self.client.get(join_url(&self.base_url, "search")).query(&[
            ("country", country),
            ("format", "json"),
            ("addressdetails", "1"),
            ("limit", "1"),
        ]);

        let places: Vec<NominatimPlace> = fetch_json(SERVICE, request).await?;
        parse_bounds(&places, country)
    }
}

/// Subset of a Nominatim search result
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub display_name: Option<String>,

    /// `[south, north, west, east]`, usually as numeric strings
    #[serde(default)]
    pub boundingbox: Vec<Value>,
}

/// Take the first place's bounding box
pub fn parse_bounds(places: &[NominatimPlace], country: &str) -> Result<BoundingBox> {
    let place = places.first().ok_or_else(|| ExplorerError::NotFound {
        country: country.to_string(),
    })?;

    let coords = place
        .boundingbox
        .iter()
        .map(coordinate)
        .collect::<Option<Vec<f64>>>()
        .filter(|c| c.len() == 4)
        .ok_or_else(|| {
            ExplorerError::upstream(
                SERVICE,
                format!("Malformed bounding box for {}: {:?}", country, place.boundingbox),
            )
        })?;

    Ok(BoundingBox::new(coords[0], coords[1], coords[2], coords[3]))
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
