//! OSM Explorer Core - Domain models, query building and result filtering
//!
//! This crate holds everything the explorer does without touching the network:
//! it turns a search request into an Overpass QL query, filters the elements that
//! come back, and defines the ports the upstream adapters implement.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod ports;
pub mod query;
pub mod search;

pub use error::{ExplorerError, Result};
pub use search::{SearchOutcome, SearchService};
