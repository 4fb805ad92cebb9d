use crate::cli::QueryArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use osmx_core::config::LayeredConfig;
use osmx_core::models::SearchRequest;
use osmx_core::ports::BoundaryLookup;
use osmx_upstream::NominatimClient;

pub async fn execute(args: QueryArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let target = &args.target;
    let request = SearchRequest::from_params(
        Some(target.country.as_str()),
        target.area.as_deref(),
        Some(target.tags.as_str()),
    )?;

    let builder = config.query_builder();
    let query = match (&request.area, args.bbox) {
        (Some(area), _) => builder.area_query(&request.country, area, &request.tags),
        (None, Some(bbox)) => builder.country_query(&bbox, &request.tags),
        (None, None) => {
            let nominatim =
                NominatimClient::new(&config.nominatim_url.value, &config.user_agent.value)?;
            let bounds = nominatim
                .resolve_bounds(&request.country)
                .await
                .with_context(|| format!("Failed to resolve bounds for {}", request.country))?;
            builder.country_query(&bounds, &request.tags)
        }
    };

    if output.is_json() {
        return output.data(&serde_json::json!({
            "request": request,
            "query": query.to_string(),
        }));
    }

    print!("{}", query);
    Ok(())
}
