use async_trait::async_trait;
use osmx_core::models::OverpassResponse;
use osmx_core::ports::FeatureQuery;
use osmx_core::query::QueryText;
use osmx_core::Result;

use crate::http::{build_client, fetch_json};

const SERVICE: &str = "overpass";

/// Overpass interpreter client
pub struct OverpassClient {
    /// Interpreter endpoint (e.g., "https://overpass-api.de/api/interpreter")
    url: String,

    client: reqwest::Client,
}

impl OverpassClient {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self::with_client(build_client(user_agent)?, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeatureQuery for OverpassClient {
    async fn execute(&self, query: &QueryText) -> Result<OverpassResponse> {
        let request = self.client.get(&self.url).query(&[("data", query.as_str())]);
        let response: OverpassResponse = fetch_json(SERVICE, request).await?;

        tracing::info!(element_count = response.elements.len(), "Overpass response received");
        Ok(response)
    }
}
