//! HTTP client factory for the recipe backend
//!
//! [`ApiClient`] binds a base URL, a [`Transport`] and the shared
//! [`CredentialStore`]. Every request it builds carries
//! `Authorization: Bearer <token>` whenever a token is stored.

pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::CredentialStore;
use crate::config::Config;

pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};

/// Why a call produced no usable result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// No bearer token stored; nothing was sent
    #[error("no bearer token stored")]
    MissingToken,
    /// The server answered with a non-2xx status
    #[error("HTTP {status} {reason}")]
    Http {
        /// Status code
        status: u16,
        /// Reason phrase
        reason: String,
    },
    /// No response could be obtained
    #[error("network error: {0}")]
    Transport(#[from] TransportError),
    /// The response body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The request body could not be serialized
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// API client bound to one backend
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl ApiClient<ReqwestTransport> {
    /// Build the production client from configuration
    pub fn from_config(config: &Config, credentials: Arc<CredentialStore>) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::with_transport(&config.api_base_url, transport, credentials))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Build a client over any transport
    pub fn with_transport(base_url: &str, transport: T, credentials: Arc<CredentialStore>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared credential store
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request; the bearer header is attached when a token is stored
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_, T> {
        let token = self.credentials.token();
        let mut headers = Vec::new();
        if let Some(token) = &token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        RequestBuilder {
            client: self,
            method,
            path: path.trim_start_matches('/').to_string(),
            query: Vec::new(),
            headers,
            body: None,
            has_token: token.is_some(),
            require_token: false,
        }
    }

    /// Start a request that must not go out without a token. Building or
    /// sending it fails with [`CallError::MissingToken`] before any I/O.
    pub fn authorized(&self, method: Method, path: &str) -> RequestBuilder<'_, T> {
        RequestBuilder {
            require_token: true,
            ..self.request(method, path)
        }
    }
}

/// A request under construction
pub struct RequestBuilder<'a, T> {
    client: &'a ApiClient<T>,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Result<String, String>>,
    has_token: bool,
    require_token: bool,
}

impl<T: Transport> RequestBuilder<'_, T> {
    /// Append a query parameter
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_string(body).map_err(|e| e.to_string()));
        self
    }

    /// Finish into plain request data
    pub fn build(self) -> Result<HttpRequest, CallError> {
        if self.require_token && !self.has_token {
            return Err(CallError::MissingToken);
        }

        let mut url = format!("{}/{}", self.client.base_url, self.path);
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        let body = self.body.transpose().map_err(CallError::Encode)?;

        Ok(HttpRequest {
            method: self.method,
            url,
            headers: self.headers,
            body,
        })
    }

    /// Send and return the raw response if it is 2xx
    pub async fn send(self) -> Result<HttpResponse, CallError> {
        let client = self.client;
        let request = self.build()?;
        tracing::debug!("{} {}", request.method, request.url);

        let response = client.transport.execute(request).await?;
        if !response.is_success() {
            return Err(CallError::Http {
                status: response.status,
                reason: response.reason,
            });
        }
        Ok(response)
    }

    /// Send and decode a JSON body
    pub async fn fetch<R: DeserializeOwned>(self) -> Result<R, CallError> {
        let response = self.send().await?;
        serde_json::from_str(&response.body).map_err(|e| CallError::Decode(e.to_string()))
    }

    /// Send, ignoring the body
    pub async fn execute(self) -> Result<(), CallError> {
        self.send().await.map(|_| ())
    }

    /// Send and return the body as text (endpoints answering `text/plain`)
    pub async fn text(self) -> Result<String, CallError> {
        self.send().await.map(|r| r.body)
    }

    /// Send and return the raw response whatever its status
    pub async fn exchange(self) -> Result<HttpResponse, CallError> {
        let client = self.client;
        let request = self.build()?;
        tracing::debug!("{} {}", request.method, request.url);
        Ok(client.transport.execute(request).await?)
    }
}

/// Collapse a call outcome into an optional value, logging the failure
pub fn settle<R>(what: &str, outcome: Result<R, CallError>) -> Option<R> {
    match outcome {
        Ok(value) => Some(value),
        Err(CallError::MissingToken) => {
            tracing::warn!("Cannot {what}: not logged in");
            None
        }
        Err(e) => {
            tracing::warn!("Failed to {what}: {e}");
            None
        }
    }
}

/// Collapse a call outcome into a success flag, logging the failure
pub fn settle_ok<R>(what: &str, outcome: Result<R, CallError>) -> bool {
    settle(what, outcome).is_some()
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    fn client(store: CredentialStore) -> ApiClient<MockTransport> {
        ApiClient::with_transport("http://api.test/", MockTransport::new(), Arc::new(store))
    }

    #[test]
    fn test_bearer_header_injected_when_token_stored() {
        let store = CredentialStore::in_memory();
        store.save_token("tok").unwrap();
        let request = client(store)
            .request(Method::Get, "/api/books")
            .build()
            .unwrap();

        assert_eq!(request.url, "http://api.test/api/books");
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_no_header_without_token() {
        let request = client(CredentialStore::in_memory())
            .request(Method::Get, "api/recipes")
            .build()
            .unwrap();
        assert!(request.header("Authorization").is_none());
    }

    #[test]
    fn test_authorized_requires_token() {
        let client = client(CredentialStore::in_memory());
        assert!(matches!(
            client.authorized(Method::Get, "api/books").build(),
            Err(CallError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_authorized_without_token_sends_nothing() {
        let client = client(CredentialStore::in_memory());
        let result = client.authorized(Method::Get, "api/books").execute().await;

        assert!(matches!(result, Err(CallError::MissingToken)));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn test_query_is_encoded() {
        let request = client(CredentialStore::in_memory())
            .request(Method::Get, "api/recipes/search")
            .query("title", "mac & cheese")
            .build()
            .unwrap();
        assert_eq!(
            request.url,
            "http://api.test/api/recipes/search?title=mac%20%26%20cheese"
        );
    }

    #[tokio::test]
    async fn test_non_success_becomes_http_error() {
        let client = client(CredentialStore::in_memory());
        client
            .transport()
            .respond(Method::Get, "/api/recipes/9", 404, "");

        let result: Result<serde_json::Value, _> =
            client.request(Method::Get, "api/recipes/9").fetch().await;
        assert!(matches!(result, Err(CallError::Http { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_offline_becomes_transport_error() {
        let client = client(CredentialStore::in_memory());
        client.transport().go_offline();

        let result = client.request(Method::Get, "api/recipes").execute().await;
        assert!(matches!(result, Err(CallError::Transport(_))));
    }

    #[test]
    fn test_settle_collapses_errors() {
        assert_eq!(settle("x", Ok::<_, CallError>(3)), Some(3));
        assert_eq!(settle::<i32>("x", Err(CallError::MissingToken)), None);
        assert!(!settle_ok::<()>(
            "x",
            Err(CallError::Http {
                status: 500,
                reason: "Internal Server Error".to_string()
            })
        ));
    }
}
