use std::sync::Arc;

use osmx_core::ports::{BoundaryLookup, CountryDirectory, FeatureQuery};
use osmx_core::query::QueryBuilder;
use osmx_core::SearchService;

#[derive(Clone)]
pub struct AppState {
    pub boundaries: Arc<dyn BoundaryLookup>,
    pub countries: Arc<dyn CountryDirectory>,
    pub search: SearchService,
}

impl AppState {
    pub fn new(
        boundaries: Arc<dyn BoundaryLookup>,
        features: Arc<dyn FeatureQuery>,
        countries: Arc<dyn CountryDirectory>,
        builder: QueryBuilder,
    ) -> Self {
        Self {
            search: SearchService::new(boundaries.clone(), features, builder),
            boundaries,
            countries,
        }
    }
}
