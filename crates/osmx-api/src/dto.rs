mod request;
mod response;

pub use request::SearchParams;
pub use response::{
    timestamp, HealthResponse, SearchDebug, SearchErrorDebug, SearchParamsEcho, SearchResponse,
};
