//! Transport capability: the only component that performs network I/O.
//!
//! # Design
//! `Transport` takes an `HttpRequest` whose path is relative and returns the
//! service's answer as an `HttpResponse`, whatever its status. Base endpoint
//! resolution, cookies, default headers and timeouts all live in the
//! implementation, so the layers above only ever deal in relative paths.

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::config::{normalize_base_url, HarnessConfig, BASE_URL_ENV};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx answers as `Ok` and reserve `Err` for
/// failures where no response exists.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport bound to one base endpoint.
///
/// Each instance owns its own client and cookie jar; two instances never
/// share cookie or header state. Not `Clone` for that reason.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, config: &HarnessConfig) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { base_url, client })
    }

    /// Build a transport for the configured live endpoint.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| ApiError::Config(format!("{BASE_URL_ENV} is not set")))?;
        Self::new(base_url, config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute request target for a relative `path`.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.resolve(&request.path);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(request.query.as_pairs());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(method = request.method.as_str(), %url, error = %e, "request failed");
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (name.as_str().to_string(), value)
            })
            .collect();
        let body = response.text().await?;

        debug!(method = request.method.as_str(), %url, status, "request completed");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::QueryParams;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(base_url, &HarnessConfig::default()).unwrap()
    }

    #[test]
    fn resolve_joins_without_double_slash() {
        let t = transport("http://localhost:3000/");
        assert_eq!(t.base_url(), "http://localhost:3000");
        assert_eq!(t.resolve("/posts"), "http://localhost:3000/posts");
        assert_eq!(t.resolve("/posts/1"), "http://localhost:3000/posts/1");
    }

    #[test]
    fn resolve_keeps_base_path_prefix() {
        let t = transport("http://localhost:3000/v1");
        assert_eq!(t.resolve("/users"), "http://localhost:3000/v1/users");
    }

    #[test]
    fn from_config_requires_base_url() {
        let err = HttpTransport::from_config(&HarnessConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpTransport::new("localhost:3000", &HarnessConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[tokio::test]
    async fn connection_refused_surfaces_as_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let t = transport(&format!("http://{addr}"));
        let err = t
            .send(HttpRequest {
                method: HttpMethod::Get,
                path: "/posts".to_string(),
                query: QueryParams::new(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
