use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::normalize::fold_key;

/// Country entry for the country picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
    pub languages: Vec<String>,
}

/// Country with its resolved bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub code: String,
    pub name: String,
    pub bounds: BoundingBox,
}

/// Sort countries by name, ignoring case and accents
pub fn sort_countries(countries: &mut [CountrySummary]) {
    countries.sort_by_cached_key(|c| (fold_key(&c.name), c.name.clone()));
}
