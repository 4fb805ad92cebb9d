//! Port trait definitions
//!
//! These traits define the upstream services the explorer depends on. The
//! `osmx-upstream` crate provides HTTP adapters for them.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BoundingBox, CountrySummary, OverpassResponse};
use crate::query::QueryText;

/// Port for resolving a country's bounding box
#[async_trait]
pub trait BoundaryLookup: Send + Sync {
    /// Resolve the best-matching boundary for an ISO 3166-1 alpha-2 code
    ///
    /// Returns `ExplorerError::NotFound` when the service has no match.
    async fn resolve_bounds(&self, country: &str) -> Result<BoundingBox>;
}

/// Port for running Overpass QL queries
#[async_trait]
pub trait FeatureQuery: Send + Sync {
    /// Execute a query and return the raw response
    async fn execute(&self, query: &QueryText) -> Result<OverpassResponse>;
}

/// Port for country metadata
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// List every known country (unsorted)
    async fn list_countries(&self) -> Result<Vec<CountrySummary>>;

    /// Common name of a country
    async fn country_name(&self, code: &str) -> Result<String>;
}
