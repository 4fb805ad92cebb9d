//! Shared request plumbing for the upstream clients

use osmx_core::{ExplorerError, Result};
use serde::de::DeserializeOwned;

/// Build a client that sends `user_agent` on every request
///
/// No timeout is set; Overpass enforces its own budget from the query header.
pub(crate) fn build_client(user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| ExplorerError::upstream("http", format!("Failed to build HTTP client: {}", e)))
}

/// Send a request and decode a JSON body, mapping every failure to `Upstream`
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(service, error = %e, "Upstream request failed");
        ExplorerError::upstream(service, format!("Failed to connect: {}", e))
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        ExplorerError::upstream(service, format!("Failed to read response body: {}", e))
    })?;

    if !status.is_success() {
        tracing::error!(service, status = status.as_u16(), "Upstream returned an error status");
        return Err(ExplorerError::Upstream {
            service,
            message: format!("Request failed with status code {}", status.as_u16()),
            status: Some(status.as_u16()),
            body: Some(body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ExplorerError::Upstream {
        service,
        message: format!("Failed to parse response: {}", e),
        status: Some(status.as_u16()),
        body: Some(body),
    })
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Append `segments` to `base`, each escaped as a single path segment
///
/// Separators inside a segment are percent-encoded and bare `.`/`..` segments
/// are skipped, so caller input cannot move the request out of its prefix.
pub(crate) fn segment_url(service: &'static str, base: &str, segments: &[&str]) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| ExplorerError::upstream(service, format!("Invalid base URL {}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| ExplorerError::upstream(service, format!("Base URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
