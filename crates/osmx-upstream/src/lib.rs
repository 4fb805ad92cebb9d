//! OSM Explorer Upstream - HTTP adapters for the public geodata services
//!
//! Each adapter implements one of the `osmx_core::ports` traits:
//! [`NominatimClient`] resolves country boundaries, [`OverpassClient`] runs
//! feature queries and [`RestCountriesClient`] lists country metadata.

mod http;
pub mod nominatim;
pub mod overpass;
pub mod restcountries;

pub use nominatim::NominatimClient;
pub use overpass::OverpassClient;
pub use restcountries::RestCountriesClient;

use osmx_core::config::LayeredConfig;
use osmx_core::Result;

/// The three clients built from one configuration
pub struct Upstreams {
    pub nominatim: NominatimClient,
    pub overpass: OverpassClient,
    pub countries: RestCountriesClient,
}

impl Upstreams {
    /// Build clients that share one connection pool
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let client = http::build_client(&config.user_agent.value)?;

        Ok(Self {
            nominatim: NominatimClient::with_client(client.clone(), &config.nominatim_url.value),
            overpass: OverpassClient::with_client(client.clone(), &config.overpass_url.value),
            countries: RestCountriesClient::with_client(client, &config.restcountries_url.value),
        })
    }
}
