//! HTTP client for the GOOD CARE cloud API.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use goodcare_core::errors::{DatabaseError, Error, Result};

/// Request timeout. Bounded so an unreachable store degrades into offline
/// mode instead of hanging the check-in.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default base URL for the GOOD CARE cloud service.
pub const DEFAULT_CLOUD_API_URL: &str = "https://api.goodcare.app";

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the GOOD CARE cloud API.
///
/// # Example
///
/// ```ignore
/// let client = CareApiClient::new("https://api.goodcare.app", "your-token")?;
/// let stats: ApiUserStats = client.get("/api/v1/users/u-1/stats").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CareApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
}

impl CareApiClient {
    /// Create a new cloud API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token format is invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    /// Make a GET request and parse the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CareApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(map_transport_error)?;

        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body and parse the response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CareApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        self.parse_response(response).await
    }

    /// Parse an HTTP response, mapping status codes onto the core error
    /// taxonomy.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Unexpected(format!("Failed to parse response: {} - {}", e, body)))
    }
}

/// Transport-level failures (refused, DNS, timeout) mean the store is
/// unreachable, not that it rejected anything.
fn map_transport_error(err: reqwest::Error) -> Error {
    Error::RemoteUnavailable(err.to_string())
}

fn map_status_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| body.chars().take(200).collect());

    if status.is_server_error() {
        // A 5xx store is as good as unreachable; fall back rather than fail
        return Error::RemoteUnavailable(format!("API error {}: {}", status, message));
    }
    match status {
        StatusCode::CONFLICT => Error::ConstraintViolation(message),
        StatusCode::NOT_FOUND => Error::Database(DatabaseError::NotFound(message)),
        _ => Error::Unexpected(format!("API error {}: {}", status, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CareApiClient::new("https://api.goodcare.app", "test-token");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_url_normalization() {
        let client = CareApiClient::new("https://api.goodcare.app/", "test-token").unwrap();
        assert_eq!(client.base_url, "https://api.goodcare.app");
    }

    #[test]
    fn test_conflict_maps_to_constraint_violation() {
        let err = map_status_error(
            StatusCode::CONFLICT,
            r#"{"error":"duplicate check-in for date"}"#,
        );
        assert!(err.is_constraint_violation());
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_server_error_maps_to_unavailable() {
        let err = map_status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_not_found_is_neither_conflict_nor_unavailable() {
        let err = map_status_error(StatusCode::NOT_FOUND, r#"{"message":"no such user"}"#);
        assert!(!err.is_unavailable());
        assert!(!err.is_constraint_violation());
        assert!(matches!(
            err,
            Error::Database(DatabaseError::NotFound(ref m)) if m == "no such user"
        ));
    }
}
