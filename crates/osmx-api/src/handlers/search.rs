use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::{SearchErrorDebug, SearchParams, SearchResponse};
use crate::error::{upstream_details, ApiError};
use crate::state::AppState;

/// GET /search - Find tagged OSM features in a country or one of its localities
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    tracing::info!(
        country = ?params.country,
        area = ?params.area,
        tags = ?params.tags,
        "Received search request"
    );

    let request = params.to_request().map_err(|e| {
        tracing::warn!(error = %e, "Rejected search request");
        ApiError::from(e)
    })?;

    let outcome = state.search.search(&request).await.map_err(|e| {
        tracing::error!(error = %e, country = %request.country, "Search failed");
        ApiError::internal(e.client_message())
            .with_details(upstream_details(&e))
            .with_debug(SearchErrorDebug::from_params(&params))
    })?;

    if outcome.is_empty() {
        tracing::info!("No results found for query");
    }

    Ok(Json(SearchResponse::from_outcome(outcome, params.area, request.tags)))
}
