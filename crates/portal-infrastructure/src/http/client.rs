// ============================================================================
// Portal Infrastructure - Backend HTTP Client
// File: crates/portal-infrastructure/src/http/client.rs
// ============================================================================
//! Thin wrapper over `reqwest` that speaks the backend envelope
//! `{ success, data, message }`.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use portal_core::domain::AccessToken;
use portal_core::error::DomainError;
use portal_shared::config::BackendSettings;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| DomainError::BackendError(format!("Failed to build HTTP client: {}", e)))?;

        // a trailing slash keeps `join` from dropping the last path segment
        let base = format!("{}/", settings.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)
            .map_err(|e| DomainError::BackendError(format!("Invalid backend URL {}: {}", settings.base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn url(&self, path: &str) -> Result<Url, DomainError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DomainError::BackendError(format!("Invalid backend path {}: {}", path, e)))
    }

    pub fn request(&self, method: Method, url: Url, token: Option<&AccessToken>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Sends the request and returns the envelope's `data`, if any.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Option<Value>, DomainError> {
        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::BackendError(format!("Backend unreachable: {}", e)))?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::BackendError(format!("Failed to read backend response: {}", e)))?;
        debug!("{} {} ({} bytes)", status.as_u16(), url, body.len());

        let envelope = if body.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<Envelope>(&body) {
                Ok(envelope) => Some(envelope),
                Err(e) if status.is_success() => {
                    return Err(DomainError::BackendError(format!("Unexpected response from {}: {}", url, e)));
                }
                Err(_) => None,
            }
        };
        let message = envelope
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        if !status.is_success() {
            warn!("Backend call {} failed with {}: {}", url, status, message);
            return Err(status_error(status, message));
        }

        match envelope {
            Some(envelope) if !envelope.success => Err(DomainError::BackendError(message)),
            Some(envelope) => Ok(envelope.data),
            None => Ok(None),
        }
    }

    /// Like [`execute`](Self::execute), decoding `data` into `T`.
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, DomainError> {
        let data = self
            .execute(builder)
            .await?
            .ok_or_else(|| DomainError::BackendError("Backend response has no data".into()))?;
        serde_json::from_value(data)
            .map_err(|e| DomainError::BackendError(format!("Unexpected response data: {}", e)))
    }
}

fn status_error(status: StatusCode, message: String) -> DomainError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::Unauthorized(message),
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY | StatusCode::CONFLICT => {
            DomainError::ValidationError(message)
        }
        _ => DomainError::BackendError(format!("{}: {}", status, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BackendClient {
        BackendClient::new(&BackendSettings { base_url: base_url.into(), timeout_seconds: 5 }).unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = client("http://localhost:3000/api");
        assert_eq!(client.url("/user/menus").unwrap().as_str(), "http://localhost:3000/api/user/menus");

        let client = self::client("http://localhost:3000/api/");
        assert_eq!(client.url("users/7").unwrap().as_str(), "http://localhost:3000/api/users/7");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BackendClient::new(&BackendSettings { base_url: "not a url".into(), timeout_seconds: 5 });
        assert!(matches!(result, Err(DomainError::BackendError(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(StatusCode::UNAUTHORIZED, "x".into()), DomainError::Unauthorized(_)));
        assert!(matches!(status_error(StatusCode::NOT_FOUND, "x".into()), DomainError::NotFound(_)));
        assert!(matches!(status_error(StatusCode::UNPROCESSABLE_ENTITY, "x".into()), DomainError::ValidationError(_)));
        assert!(matches!(status_error(StatusCode::BAD_GATEWAY, "x".into()), DomainError::BackendError(_)));
    }
}
