//! # REST Client
//!
//! Thin wrapper over `reqwest` that prefixes the base URL, attaches the
//! session's bearer token and maps non-2xx responses to `ApiError`.
//!
//! The token is read from the `Session` on every request, so logging in or
//! out takes effect immediately for requests already queued.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::session::Session;

/// Errors from talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Not retryable.
    Config(String),
    /// Timeout, DNS, connection refused.
    Network(String),
    /// The backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status: 401, .. })
    }
}

/// Error bodies look like `{"message": "..."}`; anything else is kept as text.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: Arc<Session>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    async fn send(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response, ApiError> {
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} {} -> {}", method, path, status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            warn!("{} {} failed: {} - {}", method, path, status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, req).await?;
        Self::decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, req).await?;
        Self::decode(response).await
    }

    /// Sends a JSON body and ignores whatever comes back.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let req = self.request(method.clone(), path).json(body);
        self.send(method, path, req).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, req).await?;
        info!("Deleted {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, session: Session) -> ApiClient {
        ApiClient::new(&server.uri(), DEFAULT_TIMEOUT, Arc::new(session)).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/companies"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "Yetkisiz"})),
            )
            .mount(&server)
            .await;

        let api = client(&server, Session::anonymous());
        let err = api.get::<serde_json::Value>("/api/companies").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 403,
                message: "Yetkisiz".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/location/city/3"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = client(&server, Session::anonymous());
        let err = api.delete("/api/location/city/3").await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_held() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/location/city"))
            .and(header("Authorization", "Bearer tok-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::anonymous();
        session.begin("tok-9".to_string());
        let api = client(&server, session);
        let cities: Vec<serde_json::Value> = api.get("/api/location/city").await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/get-self"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let api = client(&server, Session::anonymous());
        let err = api.get::<serde_json::Value>("/api/user/get-self").await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let api = ApiClient::new(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
            Arc::new(Session::anonymous()),
        )
        .unwrap();
        let err = api.get::<serde_json::Value>("/api/companies").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
