use clap::{Args, Parser, Subcommand};
use osmx_core::config::{parse_area_match, parse_query_timeout, CliConfigOverrides};
use osmx_core::models::BoundingBox;
use osmx_core::query::AreaMatch;
use std::path::PathBuf;

/// OSM Explorer - search OpenStreetMap features by country, locality and tag
#[derive(Parser, Debug)]
#[command(name = "osmx")]
#[command(about = "Search OpenStreetMap features by country, locality and tag", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file
    #[arg(long, global = true, env = "OSMX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overpass interpreter URL
    #[arg(long, global = true)]
    pub overpass_url: Option<String>,

    /// Nominatim base URL
    #[arg(long, global = true)]
    pub nominatim_url: Option<String>,

    /// REST Countries API root including version
    #[arg(long, global = true)]
    pub restcountries_url: Option<String>,

    /// User-Agent sent to every upstream service
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Server-side query timeout in seconds
    #[arg(long, global = true, value_parser = parse_query_timeout)]
    pub timeout: Option<u32>,

    /// Match localities by their raw or accent-stripped spelling
    #[arg(long, global = true, value_parser = parse_area_match)]
    pub area_match: Option<AreaMatch>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            overpass_url: self.overpass_url.clone(),
            nominatim_url: self.nominatim_url.clone(),
            restcountries_url: self.restcountries_url.clone(),
            user_agent: self.user_agent.clone(),
            query_timeout: self.timeout,
            area_match: self.area_match,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Overpass QL query for a search without running it
    Query(QueryArgs),

    /// Run a search and list the matching features
    Search(SearchArgs),

    /// List all countries
    Countries,

    /// Show a country's name and bounding box
    Country(CountryArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Parameters shared by `query` and `search`
#[derive(Args, Debug, Clone)]
pub struct SearchTarget {
    /// ISO 3166-1 alpha-2 country code
    #[arg(long, short = 'c')]
    pub country: String,

    /// Locality name inside the country
    #[arg(long, short = 'a')]
    pub area: Option<String>,

    /// Comma-separated feature tag keys (e.g. "amenity,shop")
    #[arg(long, short = 't')]
    pub tags: String,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub target: SearchTarget,

    /// Bounding box as "south,west,north,east" instead of asking Nominatim
    #[arg(long, value_parser = parse_bbox)]
    pub bbox: Option<BoundingBox>,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub target: SearchTarget,

    /// Show at most this many rows
    #[arg(long, default_value = "50")]
    pub limit: usize,
}

#[derive(Parser, Debug)]
pub struct CountryArgs {
    /// ISO 3166-1 alpha-2 country code
    pub code: String,
}

/// Parse "south,west,north,east"
pub fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate: {}", e))?;

    match parts.as_slice() {
        [south, west, north, east] => Ok(BoundingBox::new(*south, *north, *west, *east)),
        _ => Err(format!("expected 4 comma-separated values, got {}", parts.len())),
    }
}
