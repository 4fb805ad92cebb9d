//! HTTP-level tests for the explorer routes
//!
//! The router runs against in-process fakes of the three upstream services, so
//! these tests exercise routing, parameter parsing and response shapes only.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use osmx_api::{create_router, AppState};
use osmx_core::models::{BoundingBox, CountrySummary, GeoElement, OverpassResponse};
use osmx_core::ports::{BoundaryLookup, CountryDirectory, FeatureQuery};
use osmx_core::query::{QueryBuilder, QueryText};
use osmx_core::{ExplorerError, Result};
use serde_json::Value;
use tower::ServiceExt;

struct FakeNominatim {
    bounds: Option<BoundingBox>,
}

#[async_trait]
impl BoundaryLookup for FakeNominatim {
    async fn resolve_bounds(&self, country: &str) -> Result<BoundingBox> {
        self.bounds.ok_or_else(|| ExplorerError::NotFound { country: country.to_string() })
    }
}

#[derive(Default)]
struct FakeOverpass {
    elements: Vec<GeoElement>,
    failure: Option<(u16, &'static str)>,
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl FeatureQuery for FakeOverpass {
    async fn execute(&self, query: &QueryText) -> Result<OverpassResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some((status, body)) = self.failure {
            return Err(ExplorerError::Upstream {
                service: "overpass",
                message: format!("Request failed with status code {}", status),
                status: Some(status),
                body: Some(body.to_string()),
            });
        }
        Ok(OverpassResponse {
            version: Some(0.6),
            generator: Some("Overpass API 0.7.62".to_string()),
            elements: self.elements.clone(),
        })
    }
}

struct FakeCountries {
    available: bool,
}

#[async_trait]
impl CountryDirectory for FakeCountries {
    async fn list_countries(&self) -> Result<Vec<CountrySummary>> {
        if !self.available {
            return Err(ExplorerError::upstream("restcountries", "Failed to connect"));
        }
        Ok(vec![
            CountrySummary {
                code: "FR".to_string(),
                name: "France".to_string(),
                languages: vec!["French".to_string()],
            },
            CountrySummary {
                code: "AX".to_string(),
                name: "Åland Islands".to_string(),
                languages: vec!["Swedish".to_string()],
            },
            CountrySummary {
                code: "DZ".to_string(),
                name: "Algeria".to_string(),
                languages: vec!["Arabic".to_string(), "Berber".to_string()],
            },
        ])
    }

    async fn country_name(&self, code: &str) -> Result<String> {
        if !self.available {
            return Err(ExplorerError::upstream("restcountries", "Failed to connect"));
        }
        match code.to_uppercase().as_str() {
            "DZ" => Ok("Algeria".to_string()),
            "XX" => Ok("Nowhere".to_string()),
            _ => Err(ExplorerError::upstream("restcountries", "Request failed with status code 404")),
        }
    }
}

fn algeria() -> BoundingBox {
    BoundingBox::new(18.96, 37.29, -8.66, 11.99)
}

fn cafe(id: u64) -> GeoElement {
    GeoElement::new("node", id).with_tag("amenity", "cafe").with_tag("name", "Café Tantonville")
}

fn app(bounds: Option<BoundingBox>, overpass: Arc<FakeOverpass>, countries: bool) -> Router {
    let state = AppState::new(
        Arc::new(FakeNominatim { bounds }),
        overpass,
        Arc::new(FakeCountries { available: countries }),
        QueryBuilder::new(),
    );
    create_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(None, Arc::default(), true), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_search_missing_country() {
    let (status, body) = get(app(Some(algeria()), Arc::default(), true), "/search?tags=amenity").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"success": false, "error": "Country and tags are required"}));
}

#[tokio::test]
async fn test_search_missing_tags() {
    let (status, body) = get(app(Some(algeria()), Arc::default(), true), "/search?country=DZ&tags=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Country and tags are required");
}

#[tokio::test]
async fn test_search_no_results() {
    let overpass = Arc::new(FakeOverpass {
        elements: vec![GeoElement::new("node", 5).with_tag("amenity", "bench")],
        ..Default::default()
    });
    let (status, body) =
        get(app(Some(algeria()), overpass, true), "/search?country=DZ&tags=amenity").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "No results found");
    assert_eq!(body["elements"], serde_json::json!([]));
    assert_eq!(body["debug"]["tags"], serde_json::json!(["amenity"]));
}

#[tokio::test]
async fn test_search_with_area() {
    let overpass = Arc::new(FakeOverpass {
        elements: vec![cafe(1), GeoElement::new("node", 2).with_tag("name", "Square"), cafe(3)],
        ..Default::default()
    });
    let (status, body) = get(
        app(Some(algeria()), overpass.clone(), true),
        "/search?country=DZ&area=Algiers&tags=amenity,shop",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 2 results");
    assert_eq!(body["debug"]["area"], "Algiers");
    assert_eq!(body["debug"]["tags"], serde_json::json!(["amenity", "shop"]));
    assert_eq!(body["debug"]["resultCount"], 2);
    assert_eq!(body["version"], 0.6);

    let elements = body["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    for element in elements {
        assert_eq!(element["tags"]["addr:city"], "Algiers");
    }

    let queries = overpass.queries.lock().unwrap();
    assert!(queries[0].contains("\"^Algiers$|Algiers\",i"));
    assert!(queries[0].contains("node[\"shop\"](area.searchArea);"));
}

#[tokio::test]
async fn test_search_country_wide_uses_bounds() {
    let overpass = Arc::new(FakeOverpass { elements: vec![cafe(1)], ..Default::default() });
    let (status, _) =
        get(app(Some(algeria()), overpass.clone(), true), "/search?country=dz&tags=amenity").await;

    assert_eq!(status, StatusCode::OK);
    let queries = overpass.queries.lock().unwrap();
    assert!(queries[0].contains("node[\"amenity\"](18.96,-8.66,37.29,11.99);"));
}

#[tokio::test]
async fn test_search_upstream_failure() {
    let overpass = Arc::new(FakeOverpass {
        failure: Some((504, r#"{"remark":"timeout"}"#)),
        ..Default::default()
    });
    let (status, body) = get(
        app(Some(algeria()), overpass, true),
        "/search?country=DZ&area=Oran&tags=amenity,shop",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Request failed with status code 504");
    assert_eq!(body["details"], serde_json::json!({"remark": "timeout"}));
    assert_eq!(body["debug"]["searchParams"]["country"], "DZ");
    assert_eq!(body["debug"]["searchParams"]["area"], "Oran");
    assert_eq!(body["debug"]["searchParams"]["tags"], serde_json::json!(["amenity", "shop"]));
    assert!(body["debug"]["errorTimestamp"].is_string());
}

#[tokio::test]
async fn test_search_unknown_country_is_500() {
    let (status, body) = get(app(None, Arc::default(), true), "/search?country=XX&tags=amenity").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No boundary data found for country: XX");
    assert_eq!(body["details"], "No additional details");
}

#[tokio::test]
async fn test_list_countries_sorted() {
    let (status, body) = get(app(None, Arc::default(), true), "/api/countries").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.as_array().unwrap().iter().map(|c| c["name"].clone()).collect();
    assert_eq!(names, vec!["Åland Islands", "Algeria", "France"]);
    assert_eq!(body[1]["languages"], serde_json::json!(["Arabic", "Berber"]));
}

#[tokio::test]
async fn test_list_countries_failure() {
    let (status, body) = get(app(None, Arc::default(), false), "/api/countries").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch country list");
    assert_eq!(body["details"], "Failed to connect");
}

#[tokio::test]
async fn test_country_detail() {
    let (status, body) = get(app(Some(algeria()), Arc::default(), true), "/api/countries/dz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "code": "DZ",
            "name": "Algeria",
            "bounds": {"south": 18.96, "north": 37.29, "west": -8.66, "east": 11.99}
        })
    );
}

#[tokio::test]
async fn test_country_detail_without_boundary_is_404() {
    let (status, body) = get(app(None, Arc::default(), true), "/api/countries/XX").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"success": false, "error": "Country boundaries not found"}));
}

#[tokio::test]
async fn test_country_detail_upstream_failure() {
    let (status, body) = get(app(Some(algeria()), Arc::default(), true), "/api/countries/QQ").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch country details");
    assert_eq!(body["details"], "Request failed with status code 404");
}
