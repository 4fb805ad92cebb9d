use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use osmx_api::router::create_app;
use osmx_api::{ApiConfig, AppState};
use osmx_upstream::Upstreams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "osmx_api=info,osmx_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let upstream = config.upstream_config().context("Failed to load configuration")?;

    tracing::info!(
        port = config.port,
        overpass = %upstream.overpass_url.value,
        nominatim = %upstream.nominatim_url.value,
        restcountries = %upstream.restcountries_url.value,
        area_match = ?upstream.area_match.value,
        "Starting OSM Explorer API server"
    );

    let clients = Upstreams::from_config(&upstream)?;
    let state = Arc::new(AppState::new(
        Arc::new(clients.nominatim),
        Arc::new(clients.overpass),
        Arc::new(clients.countries),
        upstream.query_builder(),
    ));

    let app = create_app(state, &config).context("Invalid OSMX_CORS_ORIGIN")?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server is running on {}", addr);
    match &config.cors_origin {
        Some(origin) => tracing::info!("CORS enabled for {}", origin),
        None => tracing::info!("CORS enabled for any origin"),
    }

    axum::serve(listener, app).await?;
    Ok(())
}
