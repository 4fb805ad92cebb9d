use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use osmx_core::ExplorerError;
use serde::Serialize;
use serde_json::Value;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
    pub debug: Option<Value>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            debug: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach a debug block; serialization failures leave it out
    pub fn with_debug(mut self, debug: impl Serialize) -> Self {
        self.debug = serde_json::to_value(debug).ok();
        self
    }
}

/// Upstream response body as JSON when it parses, as text otherwise
pub fn upstream_details(err: &ExplorerError) -> Value {
    match err.upstream_body() {
        Some(body) => serde_json::from_str(body).unwrap_or_else(|_| Value::from(body)),
        None => Value::from("No additional details"),
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
            details: self.details,
            debug: self.debug,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        match &err {
            ExplorerError::Validation(message) => Self::bad_request(message.clone()),
            ExplorerError::NotFound { .. } => Self::not_found(err.to_string()),
            _ => Self::internal(err.client_message()).with_details(upstream_details(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = ExplorerError::Validation("Country and tags are required".into()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Country and tags are required");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = ExplorerError::NotFound { country: "XX".into() }.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_details() {
        let json_body = ExplorerError::Upstream {
            service: "overpass",
            message: "Request failed with status code 400".into(),
            status: Some(400),
            body: Some(r#"{"remark":"parse error"}"#.into()),
        };
        assert_eq!(upstream_details(&json_body), serde_json::json!({"remark": "parse error"}));

        let text_body = ExplorerError::Upstream {
            service: "overpass",
            message: "Request failed with status code 400".into(),
            status: Some(400),
            body: Some("<html>error</html>".into()),
        };
        assert_eq!(upstream_details(&text_body), Value::from("<html>error</html>"));

        let no_body = ExplorerError::upstream("nominatim", "Failed to connect");
        assert_eq!(upstream_details(&no_body), Value::from("No additional details"));
    }

    #[test]
    fn test_upstream_maps_to_500_with_details() {
        let err: ApiError = ExplorerError::upstream("overpass", "Failed to connect").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to connect");
        assert_eq!(err.details, Some(Value::from("No additional details")));
    }
}
