use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use osmx_core::models::{sort_countries, CountryDetail, CountrySummary};
use osmx_core::ExplorerError;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/countries - All countries sorted by name
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    let mut countries = state.countries.list_countries().await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching countries");
        ApiError::internal("Failed to fetch country list").with_details(e.client_message())
    })?;

    sort_countries(&mut countries);
    Ok(Json(countries))
}

/// GET /api/countries/{code} - Country name and bounding box
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CountryDetail>, ApiError> {
    let details_failed = |e: ExplorerError| {
        tracing::error!(error = %e, code = %code, "Error fetching country details");
        ApiError::internal("Failed to fetch country details").with_details(e.client_message())
    };

    let name = state.countries.country_name(&code).await.map_err(details_failed)?;

    let bounds = match state.boundaries.resolve_bounds(&code).await {
        Ok(bounds) => bounds,
        Err(ExplorerError::NotFound { .. }) => {
            tracing::info!(code = %code, "Country boundaries not found");
            return Err(ApiError::not_found("Country boundaries not found"));
        }
        Err(e) => return Err(details_failed(e)),
    };

    Ok(Json(CountryDetail {
        code: code.to_uppercase(),
        name,
        bounds,
    }))
}
