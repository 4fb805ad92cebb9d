pub mod country;
pub mod element;
pub mod search;

pub use country::{sort_countries, CountryDetail, CountrySummary};
pub use element::{GeoElement, OverpassResponse, LOCALITY_KEY, NAME_KEYS};
pub use search::{split_tags, BoundingBox, SearchRequest};
