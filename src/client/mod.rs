// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed client for the MentorHub API.
//!
//! Every network call goes through [`ApiClient::api_call`], which resolves
//! the URL for the configured [`RequestStrategy`], attaches JSON and auth
//! headers, and turns non-2xx responses into [`ClientError::Api`].

pub mod auth;
pub mod background;
pub mod dashboard;
pub mod feed;
pub mod mentors;
pub mod profile;
pub mod sessions;
pub mod views;

pub use auth::{route_for_role, AuthContext};

use crate::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Message used when an error response carries no usable `message`.
pub const DEFAULT_API_ERROR: &str = "API request failed";

/// How request URLs reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStrategy {
    /// `{backend}{endpoint}`; the backend must allow CORS.
    Direct,
    /// `{prefix}{urlencode(backend + endpoint)}` through a public CORS proxy.
    CorsProxy { prefix: String },
    /// `{origin}{endpoint}` through a same-origin development proxy.
    DevProxy { origin: String },
}

impl RequestStrategy {
    pub const CORSPROXY_PREFIX: &'static str = "https://corsproxy.io/?";
    pub const ALLORIGINS_PREFIX: &'static str = "https://api.allorigins.win/raw?url=";

    pub fn corsproxy() -> Self {
        RequestStrategy::CorsProxy {
            prefix: Self::CORSPROXY_PREFIX.to_string(),
        }
    }

    pub fn allorigins() -> Self {
        RequestStrategy::CorsProxy {
            prefix: Self::ALLORIGINS_PREFIX.to_string(),
        }
    }

    /// Final URL for `endpoint` (which starts with `/`).
    pub fn resolve(&self, backend_url: &str, endpoint: &str) -> String {
        match self {
            RequestStrategy::Direct => format!("{}{}", backend_url, endpoint),
            RequestStrategy::CorsProxy { prefix } => format!(
                "{}{}",
                prefix,
                urlencoding::encode(&format!("{}{}", backend_url, endpoint))
            ),
            RequestStrategy::DevProxy { origin } => {
                format!("{}{}", origin.trim_end_matches('/'), endpoint)
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RequestStrategy::Direct => "direct",
            RequestStrategy::CorsProxy { .. } => "cors-proxy",
            RequestStrategy::DevProxy { .. } => "dev-proxy",
        }
    }
}

/// Client-side errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Unable to connect to backend. Please check if CORS is enabled on the server.")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid JSON for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid query for {path}: {source}")]
    Query {
        path: String,
        #[source]
        source: serde_urlencoded::ser::Error,
    },
}

impl ClientError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Append `query` to `path`. Fields serialized as nothing are left out.
pub fn with_query<Q: Serialize>(path: String, query: &Q) -> Result<String, ClientError> {
    match serde_urlencoded::to_string(query) {
        Ok(qs) if qs.is_empty() => Ok(path),
        Ok(qs) => Ok(format!("{}?{}", path, qs)),
        Err(source) => Err(ClientError::Query { path, source }),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message to surface for a failed response body.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ERROR.to_string())
}

/// JSON content type and credentials, then caller headers on top.
pub fn build_headers(auth: &AuthContext, caller: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = auth.token() {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
            headers.insert(AUTHORIZATION, value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("token={}", token)) {
            headers.insert(COOKIE, value);
        }
    }

    for (name, value) in caller {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

/// MentorHub API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    backend_url: String,
    strategy: RequestStrategy,
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(backend_url: &str, strategy: RequestStrategy, auth: AuthContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            strategy,
            auth,
        }
    }

    pub fn from_config(config: &ClientConfig, auth: AuthContext) -> Self {
        Self::new(&config.backend_url, config.strategy.clone(), auth)
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        self.strategy.resolve(&self.backend_url, endpoint)
    }

    /// Send one request and decode the JSON response.
    ///
    /// No retries and no timeout; a hung backend hangs the call.
    pub async fn api_call<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: &HeaderMap,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(endpoint);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(build_headers(&self.auth, headers));
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(|source| ClientError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;
            request = request.body(encoded);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                endpoint,
                backend = %self.backend_url,
                strategy = self.strategy.label(),
                error = %e,
                "Backend unreachable; it may not have CORS enabled"
            );
            ClientError::Network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Network)?;

        if !status.is_success() {
            let message = error_message(&bytes);
            tracing::warn!(
                endpoint,
                %method,
                status = status.as_u16(),
                message = %message,
                "API error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Empty bodies decode as JSON null so `()` responses work.
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes[..] };
        serde_json::from_slice(bytes).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.api_call::<T, ()>(Method::GET, endpoint, None, &HeaderMap::new())
            .await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api_call(Method::POST, endpoint, Some(body), &HeaderMap::new())
            .await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api_call(Method::PATCH, endpoint, Some(body), &HeaderMap::new())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.api_call::<T, ()>(Method::DELETE, endpoint, None, &HeaderMap::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND: &str = "https://api.example.com";

    #[test]
    fn test_resolve_strategies() {
        assert_eq!(
            RequestStrategy::Direct.resolve(BACKEND, "/api/me"),
            "https://api.example.com/api/me"
        );
        assert_eq!(
            RequestStrategy::corsproxy().resolve(BACKEND, "/api/sessions/user/u1?role=mentor"),
            "https://corsproxy.io/?https%3A%2F%2Fapi.example.com%2Fapi%2Fsessions%2Fuser%2Fu1%3Frole%3Dmentor"
        );
        assert_eq!(
            RequestStrategy::allorigins().resolve(BACKEND, "/api/me"),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fapi.example.com%2Fapi%2Fme"
        );
        assert_eq!(
            RequestStrategy::DevProxy {
                origin: "http://localhost:5173/".to_string()
            }
            .resolve(BACKEND, "/api/me"),
            "http://localhost:5173/api/me"
        );
    }

    #[test]
    fn test_headers_default_to_json() {
        let headers = build_headers(&AuthContext::anonymous(), &HeaderMap::new());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn test_caller_headers_win() {
        let mut caller = HeaderMap::new();
        caller.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        caller.insert("X-Request-Id", HeaderValue::from_static("abc"));

        let headers = build_headers(&AuthContext::from_token("t0k"), &caller);

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get("X-Request-Id").unwrap(), "abc");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer t0k");
        assert_eq!(headers.get(COOKIE).unwrap(), "token=t0k");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(
            error_message(br#"{"ok":false,"message":"Session not found"}"#),
            "Session not found"
        );
        assert_eq!(error_message(br#"{"ok":false}"#), DEFAULT_API_ERROR);
        assert_eq!(error_message(br#"{"message":""}"#), DEFAULT_API_ERROR);
        assert_eq!(error_message(b"<html>502</html>"), DEFAULT_API_ERROR);
    }
}
