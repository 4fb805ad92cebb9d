use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Tag keys that count as a display name, in lookup order
pub const NAME_KEYS: [&str; 4] = ["name", "name:en", "name:fr", "name:ar"];

/// Tag key that carries the searched locality on returned elements
pub const LOCALITY_KEY: &str = "addr:city";

/// A node, way or relation as returned by Overpass
///
/// Only the fields the explorer inspects are typed; everything else
/// (coordinates, node lists, metadata) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoElement {
    #[serde(rename = "type", default)]
    pub kind: String,

    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeoElement {
    /// Create an element with no tags or extra fields
    pub fn new(kind: impl Into<String>, id: u64) -> Self {
        Self {
            kind: kind.into(),
            id,
            tags: None,
            extra: Map::new(),
        }
    }

    /// Add a tag, creating the tag map if needed
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
        self
    }

    /// Non-empty value of a tag
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// First available name among [`NAME_KEYS`]
    pub fn display_name(&self) -> Option<&str> {
        NAME_KEYS.iter().find_map(|key| self.tag(key))
    }

    pub fn has_name(&self) -> bool {
        self.display_name().is_some()
    }

    /// Whether any of the requested tag keys has a value on this element
    pub fn has_any_tag<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        keys.iter().any(|key| self.tag(key.as_ref()).is_some())
    }

    /// Return a copy stamped with the searched locality
    ///
    /// Elements without a tag map are returned unchanged.
    pub fn with_locality(mut self, area: &str) -> Self {
        if let Some(tags) = self.tags.as_mut() {
            tags.insert(LOCALITY_KEY.to_string(), area.to_string());
        }
        self
    }
}

/// Overpass interpreter response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub version: Option<f64>,

    #[serde(default)]
    pub generator: Option<String>,

    #[serde(default)]
    pub elements: Vec<GeoElement>,
}
