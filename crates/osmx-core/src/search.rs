//! Search orchestration: resolve bounds, build the query, run it, filter the results

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::filter::filter_elements;
use crate::models::{GeoElement, SearchRequest};
use crate::ports::{BoundaryLookup, FeatureQuery};
use crate::query::QueryBuilder;

/// Filtered search results plus the Overpass envelope fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub version: Option<f64>,
    pub generator: Option<String>,
    pub elements: Vec<GeoElement>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Runs searches against the boundary and feature services
#[derive(Clone)]
pub struct SearchService {
    boundaries: Arc<dyn BoundaryLookup>,
    features: Arc<dyn FeatureQuery>,
    builder: QueryBuilder,
}

impl SearchService {
    pub fn new(
        boundaries: Arc<dyn BoundaryLookup>,
        features: Arc<dyn FeatureQuery>,
        builder: QueryBuilder,
    ) -> Self {
        Self {
            boundaries,
            features,
            builder,
        }
    }

    /// Execute a search
    ///
    /// Any failure aborts the whole search; nothing is retried.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let bounds = self.boundaries.resolve_bounds(&request.country).await?;
        tracing::debug!(country = %request.country, ?bounds, "Resolved country bounds");

        let query = self.builder.build(request, &bounds);
        tracing::debug!(query = %query, "Executing Overpass query");

        let response = self.features.execute(&query).await?;
        let received = response.elements.len();

        let elements = filter_elements(response.elements, request.area.as_deref(), &request.tags);
        tracing::info!(
            country = %request.country,
            area = request.area.as_deref().unwrap_or_default(),
            tags = request.tags.len(),
            received = received,
            retained = elements.len(),
            "Search completed"
        );

        Ok(SearchOutcome {
            version: response.version,
            generator: response.generator,
            elements,
        })
    }
}
