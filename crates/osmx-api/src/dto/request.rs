use osmx_core::models::SearchRequest;
use serde::Deserialize;

/// Raw `/search` query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub country: Option<String>,
    pub area: Option<String>,
    /// Comma-separated tag keys
    pub tags: Option<String>,
}

impl SearchParams {
    pub fn to_request(&self) -> osmx_core::Result<SearchRequest> {
        SearchRequest::from_params(
            self.country.as_deref(),
            self.area.as_deref(),
            self.tags.as_deref(),
        )
    }
}
