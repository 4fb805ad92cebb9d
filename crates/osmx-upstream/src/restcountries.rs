use async_trait::async_trait;
use osmx_core::models::CountrySummary;
use osmx_core::ports::CountryDirectory;
use osmx_core::{ExplorerError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::http::{build_client, fetch_json, join_url, segment_url};

const SERVICE: &str = "restcountries";

/// Fields requested from the `all` endpoint, which rejects unfiltered calls
const LIST_FIELDS: &str = "cca2,name,languages";

/// REST Countries client
pub struct RestCountriesClient {
    /// API root including version (e.g., "https://restcountries.com/v3.1")
    base_url: String,

    client: reqwest::Client,
}

impl RestCountriesClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self::with_client(build_client(user_agent)?, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn list_countries(&self) -> Result<Vec<CountrySummary>> {
        let request = self
            .client
            .get(join_url(&self.base_url, "all"))
            .query(&[("fields", LIST_FIELDS)]);

        let records: Vec<CountryRecord> = fetch_json(SERVICE, request).await?;
        tracing::debug!(count = records.len(), "Fetched country list");

        Ok(records.into_iter().map(CountryRecord::into_summary).collect())
    }

    async fn country_name(&self, code: &str) -> Result<String> {
        let url = segment_url(SERVICE, &self.base_url, &["alpha", code])?;
        let request = self.client.get(url);
        let records: Vec<CountryRecord> = fetch_json(SERVICE, request).await?;

        first_name(records, code)
    }
}

/// Subset of a REST Countries v3.1 record
#[derive(Debug, Deserialize)]
pub struct CountryRecord {
    pub cca2: String,
    pub name: CountryName,
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct CountryName {
    pub common: String,
}

impl CountryRecord {
    pub fn into_summary(self) -> CountrySummary {
        CountrySummary {
            code: self.cca2,
            name: self.name.common,
            languages: self.languages.map(|l| l.into_values().collect()).unwrap_or_default(),
        }
    }
}

fn first_name(records: Vec<CountryRecord>, code: &str) -> Result<String> {
    records
        .into_iter()
        .next()
        .map(|r| r.name.common)
        .ok_or_else(|| ExplorerError::upstream(SERVICE, format!("No country record for {}", code)))
}
