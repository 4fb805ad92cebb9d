//! Overpass QL query construction
//!
//! Queries are assembled from typed statements and only turned into text at the
//! end, when [`OverpassQuery`] is displayed. String literals are always quoted and
//! escaped during serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{BoundingBox, SearchRequest};
use crate::normalize::strip_diacritics;

/// Server-side execution budget written into every query
pub const DEFAULT_TIMEOUT_SECS: u32 = 60;

const COUNTRY_SET: &str = "country";
const SEARCH_AREA_SET: &str = "searchArea";
const ADMIN_LEVEL_PATTERN: &str = "^(4|6|8)$";
const PLACE_PATTERN: &str = "city|town";

/// Name keys a locality is matched against
const AREA_NAME_KEYS: [&str; 3] = ["name", "name:fr", "name:ar"];

/// Which spelling of the locality name goes into the match pattern
///
/// Accents are always stripped from the area name, but historically the raw
/// spelling is what gets matched. `Raw` keeps that behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaMatch {
    #[default]
    Raw,
    Normalized,
}

/// A complete, ready-to-send Overpass QL query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element type a selection statement queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Area,
    Node,
    Way,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Area => "area",
            ElementKind::Node => "node",
            ElementKind::Way => "way",
        })
    }
}

/// Tag filter attached to a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    /// `["key"]`
    Has(String),
    /// `["key"="value"]`
    Equals(String, String),
    /// `["key"~"pattern"]`, optionally `,i`
    Matches {
        key: String,
        pattern: String,
        case_insensitive: bool,
    },
}

impl TagFilter {
    pub fn has(key: impl Into<String>) -> Self {
        Self::Has(key.into())
    }

    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals(key.into(), value.into())
    }

    pub fn matches(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Matches {
            key: key.into(),
            pattern: pattern.into(),
            case_insensitive: false,
        }
    }

    pub fn matches_ignore_case(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Matches {
            key: key.into(),
            pattern: pattern.into(),
            case_insensitive: true,
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::Has(key) => write!(f, "[{}]", Quoted(key)),
            TagFilter::Equals(key, value) => write!(f, "[{}={}]", Quoted(key), Quoted(value)),
            TagFilter::Matches {
                key,
                pattern,
                case_insensitive,
            } => {
                write!(f, "[{}~{}", Quoted(key), Quoted(pattern))?;
                if *case_insensitive {
                    f.write_str(",i")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Spatial restriction on a selection
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// Inside the areas held in a named set
    InArea(String),
    /// Inside a bounding box
    Within(BoundingBox),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::InArea(set) => write!(f, "(area.{})", set),
            // Overpass orders bbox coordinates south, west, north, east
            Scope::Within(b) => write!(f, "({},{},{},{})", b.south, b.west, b.north, b.east),
        }
    }
}

/// One `kind[filters...](scope)->.set` selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub kind: ElementKind,
    pub filters: Vec<TagFilter>,
    pub scope: Option<Scope>,
    pub into: Option<String>,
}

impl Selection {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            scope: None,
            into: None,
        }
    }

    pub fn filter(mut self, filter: TagFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn into_set(mut self, set: impl Into<String>) -> Self {
        self.into = Some(set.into());
        self
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for filter in &self.filters {
            write!(f, "{}", filter)?;
        }
        if let Some(scope) = &self.scope {
            write!(f, "{}", scope)?;
        }
        if let Some(set) = &self.into {
            write!(f, "->.{}", set)?;
        }
        Ok(())
    }
}

/// Verbosity of an `out` statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutMode {
    BodyQt,
    SkelQt,
}

/// Top-level query statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Selection),
    Union {
        members: Vec<Selection>,
        into: Option<String>,
    },
    Print(OutMode),
    /// `>;`, pulls in the nodes of the ways in the current set
    RecurseDown,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(selection) => write!(f, "{};", selection),
            Statement::Union { members, into } => {
                writeln!(f, "(")?;
                for member in members {
                    writeln!(f, "  {};", member)?;
                }
                f.write_str(")")?;
                if let Some(set) = into {
                    write!(f, "->.{}", set)?;
                }
                f.write_str(";")
            }
            Statement::Print(OutMode::BodyQt) => f.write_str("out body qt;"),
            Statement::Print(OutMode::SkelQt) => f.write_str("out skel qt;"),
            Statement::RecurseDown => f.write_str(">;"),
        }
    }
}

/// Structured Overpass QL query with JSON output
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    pub timeout_secs: u32,
    pub statements: Vec<Statement>,
}

impl OverpassQuery {
    pub fn to_query_text(&self) -> QueryText {
        QueryText(self.to_string())
    }
}

impl fmt::Display for OverpassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[out:json][timeout:{}];", self.timeout_secs)?;
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// Double-quoted Overpass string literal
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                _ => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")
    }
}

/// Builds feature-search queries for a country or a locality inside it
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    timeout_secs: u32,
    area_match: AreaMatch,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            area_match: AreaMatch::Raw,
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_area_match(mut self, area_match: AreaMatch) -> Self {
        self.area_match = area_match;
        self
    }

    /// Build the query text for a request
    ///
    /// `bounds` is only used when the request has no area.
    pub fn build(&self, request: &SearchRequest, bounds: &BoundingBox) -> QueryText {
        let query = match &request.area {
            Some(area) => self.area_query(&request.country, area, &request.tags),
            None => self.country_query(bounds, &request.tags),
        };
        query.to_query_text()
    }

    /// Features carrying any of `tags` inside a named locality of `country`
    pub fn area_query(&self, country: &str, area: &str, tags: &[String]) -> OverpassQuery {
        let normalized = strip_diacritics(area);
        tracing::debug!(area = %area, normalized = %normalized, "Normalized area name");

        let needle = match self.area_match {
            AreaMatch::Raw => area,
            AreaMatch::Normalized => normalized.as_str(),
        };
        let name_pattern = format!("^{needle}$|{needle}");

        let country_area = Selection::new(ElementKind::Area)
            .filter(TagFilter::equals("ISO3166-1", country))
            .filter(TagFilter::equals("admin_level", "2"))
            .into_set(COUNTRY_SET);

        let mut sub_areas: Vec<Selection> = AREA_NAME_KEYS
            .iter()
            .map(|key| {
                Selection::new(ElementKind::Area)
                    .filter(TagFilter::matches_ignore_case(*key, name_pattern.as_str()))
                    .filter(TagFilter::matches("admin_level", ADMIN_LEVEL_PATTERN))
                    .scope(Scope::InArea(COUNTRY_SET.to_string()))
            })
            .collect();
        sub_areas.push(
            Selection::new(ElementKind::Area)
                .filter(TagFilter::matches("place", PLACE_PATTERN))
                .filter(TagFilter::matches_ignore_case("name", name_pattern.as_str()))
                .scope(Scope::InArea(COUNTRY_SET.to_string())),
        );

        let mut statements = vec![
            Statement::Select(country_area),
            Statement::Union {
                members: sub_areas,
                into: Some(SEARCH_AREA_SET.to_string()),
            },
        ];
        statements.extend(Self::feature_search(tags, Scope::InArea(SEARCH_AREA_SET.to_string())));

        OverpassQuery {
            timeout_secs: self.timeout_secs,
            statements,
        }
    }

    /// Features carrying any of `tags` inside a bounding box
    pub fn country_query(&self, bounds: &BoundingBox, tags: &[String]) -> OverpassQuery {
        OverpassQuery {
            timeout_secs: self.timeout_secs,
            statements: Self::feature_search(tags, Scope::Within(*bounds)).into(),
        }
    }

    /// Node and way selections per tag, followed by the output statements
    fn feature_search(tags: &[String], scope: Scope) -> [Statement; 4] {
        let members = tags
            .iter()
            .flat_map(|tag| {
                [ElementKind::Node, ElementKind::Way].map(|kind| {
                    Selection::new(kind).filter(TagFilter::has(tag.as_str())).scope(scope.clone())
                })
            })
            .collect();

        [
            Statement::Union { members, into: None },
            Statement::Print(OutMode::BodyQt),
            Statement::RecurseDown,
            Statement::Print(OutMode::SkelQt),
        ]
    }
}
