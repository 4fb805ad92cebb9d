use std::sync::Arc;

use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use osmx_core::config::LayeredConfig;
use osmx_core::models::{GeoElement, SearchRequest};
use osmx_core::SearchService;
use osmx_upstream::Upstreams;
use tabled::Tabled;

#[derive(Tabled)]
struct ElementRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Matched")]
    matched: String,
}

impl ElementRow {
    fn new(element: &GeoElement, tags: &[String]) -> Self {
        let matched = tags
            .iter()
            .filter_map(|tag| element.tag(tag).map(|value| format!("{}={}", tag, value)))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: element.id,
            kind: element.kind.clone(),
            name: element.display_name().unwrap_or_default().to_string(),
            matched,
        }
    }
}

pub async fn execute(args: SearchArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let target = &args.target;
    let request = SearchRequest::from_params(
        Some(target.country.as_str()),
        target.area.as_deref(),
        Some(target.tags.as_str()),
    )?;

    let upstreams = Upstreams::from_config(config)?;
    let service = SearchService::new(
        Arc::new(upstreams.nominatim),
        Arc::new(upstreams.overpass),
        config.query_builder(),
    );

    let outcome = service.search(&request).await.context("Search failed")?;

    if output.is_json() {
        return output.data(&outcome);
    }

    if outcome.is_empty() {
        output.info("No results found");
        return Ok(());
    }

    output.success(format!("Found {} results", outcome.elements.len()));
    let rows: Vec<ElementRow> = outcome
        .elements
        .iter()
        .take(args.limit)
        .map(|element| ElementRow::new(element, &request.tags))
        .collect();
    output.table(rows);

    if outcome.elements.len() > args.limit {
        output.info(format!("{} more not shown (use --limit)", outcome.elements.len() - args.limit));
    }
    Ok(())
}
