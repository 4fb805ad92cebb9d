use crate::cli::CountryArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use osmx_core::config::LayeredConfig;
use osmx_core::models::{sort_countries, CountryDetail, CountrySummary};
use osmx_core::ports::{BoundaryLookup, CountryDirectory};
use osmx_upstream::Upstreams;
use tabled::Tabled;

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Languages")]
    languages: String,
}

impl From<CountrySummary> for CountryRow {
    fn from(country: CountrySummary) -> Self {
        Self {
            code: country.code,
            name: country.name,
            languages: country.languages.join(", "),
        }
    }
}

pub async fn list(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let upstreams = Upstreams::from_config(config)?;
    let mut countries = upstreams
        .countries
        .list_countries()
        .await
        .context("Failed to fetch country list")?;
    sort_countries(&mut countries);

    if output.is_json() {
        return output.data(&countries);
    }

    output.table(countries.into_iter().map(CountryRow::from).collect::<Vec<_>>());
    Ok(())
}

pub async fn show(args: CountryArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let upstreams = Upstreams::from_config(config)?;

    let name = upstreams
        .countries
        .country_name(&args.code)
        .await
        .context("Failed to fetch country details")?;
    let bounds = upstreams
        .nominatim
        .resolve_bounds(&args.code)
        .await
        .context("Failed to fetch country boundaries")?;

    let detail = CountryDetail {
        code: args.code.to_uppercase(),
        name,
        bounds,
    };

    if output.is_json() {
        return output.data(&detail);
    }

    output.section(format!("{} ({})", detail.name, detail.code));
    output.kv("South", detail.bounds.south);
    output.kv("North", detail.bounds.north);
    output.kv("West", detail.bounds.west);
    output.kv("East", detail.bounds.east);
    Ok(())
}
