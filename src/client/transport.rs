//! HTTP transport shared by every resource API
//!
//! Builds URLs against the configured base, attaches the bearer credential
//! and the optional account scope, and hands back either the decoded JSON
//! body or the raw failure.

use crate::config::ApiConfig;
use crate::domain::AccountId;
use crate::error::ApiError;
use crate::telemetry::metrics;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, warn};

/// Header carrying the account scope of a request
pub const ACCOUNT_HEADER: &str = "X-Account-ID";

/// Which context a request operates in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestScope {
    /// The caller's own default context
    #[default]
    Default,
    /// On behalf of a specific account
    Account(AccountId),
}

impl RequestScope {
    pub fn account_id(&self) -> Option<&AccountId> {
        match self {
            RequestScope::Default => None,
            RequestScope::Account(id) => Some(id),
        }
    }
}

impl From<Option<&AccountId>> for RequestScope {
    fn from(account: Option<&AccountId>) -> Self {
        account
            .cloned()
            .map(RequestScope::Account)
            .unwrap_or_default()
    }
}

/// Successful response: decoded payload plus the status it came with
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
        }
    }
}

pub type ApiResult<T> = std::result::Result<ApiResponse<T>, ApiError>;

/// Source of the bearer credential attached to each request
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Shared, swappable bearer token.
///
/// The session store writes it on login/logout; the transport reads it on
/// every request.
#[derive(Debug, Clone, Default)]
pub struct SharedToken(Arc<RwLock<Option<String>>>);

impl SharedToken {
    pub fn new(token: Option<String>) -> Self {
        SharedToken(Arc::new(RwLock::new(token)))
    }

    pub fn set(&self, token: Option<String>) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn clear(&self) {
        self.set(None);
    }
}

impl TokenProvider for SharedToken {
    fn token(&self) -> Option<String> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Low-level HTTP transport
#[derive(Clone)]
pub struct Transport {
    base_url: String,
    http_client: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl Transport {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url)?;
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/notes/42`
    pub fn url(&self, path: &str) -> Result<url::Url, ApiError> {
        let path = path.trim_start_matches('/');
        Ok(url::Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    fn builder(
        &self,
        method: Method,
        path: &str,
        scope: &RequestScope,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder = self.http_client.request(method, self.url(path)?);
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token);
        }
        if let RequestScope::Account(account_id) = scope {
            builder = builder.header(ACCOUNT_HEADER, account_id.as_str());
        }
        Ok(builder)
    }

    /// Send one request. `customize` adds the query string or body.
    ///
    /// Non-2xx responses come back as [`ApiError::Status`] with the body
    /// untouched. Empty success bodies decode to `Value::Null`.
    pub async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        scope: &RequestScope,
        customize: F,
    ) -> Result<ApiResponse<Value>, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let builder = customize(self.builder(method.clone(), path, scope)?);
        debug!(
            method = %method,
            path = %path,
            account = scope.account_id().map(|a| a.as_str()),
            "API request"
        );

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        metrics::record_api_request(&method, status, started.elapsed());

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        method = %method,
                        path = %path,
                        status = status.as_u16(),
                        error = %e,
                        "failed to read error response body"
                    );
                    String::new()
                }
            };
            warn!(method = %method, path = %path, status = status.as_u16(), "API request failed");
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        Ok(ApiResponse { data, status })
    }
}

/// Percent-encode an identifier for use as a single path segment
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> Transport {
        let config = ApiConfig {
            base_url: base.to_string(),
            ..Default::default()
        };
        Transport::new(&config, Arc::new(SharedToken::default())).unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let t = transport("http://localhost:5000/api/");
        assert_eq!(
            t.url("/notes/1").unwrap().as_str(),
            "http://localhost:5000/api/notes/1"
        );
        assert_eq!(
            t.url("notes").unwrap().as_str(),
            "http://localhost:5000/api/notes"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "::nope".to_string(),
            ..Default::default()
        };
        assert!(Transport::new(&config, Arc::new(SharedToken::default())).is_err());
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            // Promise more body than is sent, then hang up
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 64\r\n\r\nupstream")
                .await
                .unwrap();
        });

        let t = transport(&format!("http://{addr}"));
        let err = t
            .execute(Method::GET, "/notes", &RequestScope::Default, |b| b)
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(body.is_empty());
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_token() {
        let token = SharedToken::new(Some("abc".into()));
        assert_eq!(token.token().as_deref(), Some("abc"));
        let clone = token.clone();
        clone.clear();
        assert!(token.token().is_none());
    }

    #[test]
    fn test_scope_from_option() {
        let id = AccountId::from("acc");
        assert_eq!(RequestScope::from(Some(&id)), RequestScope::Account(id.clone()));
        assert_eq!(RequestScope::from(None::<&AccountId>), RequestScope::Default);
        assert_eq!(RequestScope::Account(id.clone()).account_id(), Some(&id));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(segment("plain-id"), "plain-id");
    }
}
