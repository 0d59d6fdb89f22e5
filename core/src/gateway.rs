//! Request gateway: verb-level wrapper over a `Transport`.
//!
//! # Design
//! Every outbound request in the harness passes through `RequestGateway`.
//! Each verb is split into a pure `build_*` step that produces an
//! `HttpRequest` and a single `send` through the transport, so request shape
//! can be checked without any I/O. The gateway does not look at status codes
//! and does not retry; a transport error is returned exactly as the
//! transport produced it.

use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, QueryParams};
use crate::transport::Transport;

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

#[derive(Debug, Clone)]
pub struct RequestGateway<T> {
    transport: T,
}

impl<T: Transport> RequestGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path`, appending `query` when it is non-empty.
    pub async fn read(&self, path: &str, query: Option<&QueryParams>) -> Result<HttpResponse> {
        let request = build_read(path, query)?;
        self.transport.send(request).await
    }

    /// POST `payload` as JSON to `path`.
    pub async fn create<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<HttpResponse> {
        let request = build_with_body(HttpMethod::Post, path, payload)?;
        self.transport.send(request).await
    }

    /// PUT `payload` as JSON to `path`.
    pub async fn replace<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<HttpResponse> {
        let request = build_with_body(HttpMethod::Put, path, payload)?;
        self.transport.send(request).await
    }

    /// DELETE `path`. No body is sent.
    pub async fn remove(&self, path: &str) -> Result<HttpResponse> {
        let request = build_remove(path)?;
        self.transport.send(request).await
    }
}

/// Reject anything that would let a caller bypass base-endpoint resolution.
fn check_relative(path: &str) -> Result<()> {
    if !path.starts_with('/') || path.starts_with("//") || path.contains("://") {
        return Err(ApiError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn build_read(path: &str, query: Option<&QueryParams>) -> Result<HttpRequest> {
    check_relative(path)?;
    Ok(HttpRequest {
        method: HttpMethod::Get,
        path: path.to_string(),
        query: query.cloned().unwrap_or_default(),
        headers: Vec::new(),
        body: None,
    })
}

fn build_with_body<P: Serialize + ?Sized>(
    method: HttpMethod,
    path: &str,
    payload: &P,
) -> Result<HttpRequest> {
    check_relative(path)?;
    let body = serde_json::to_string(payload).map_err(ApiError::Serialization)?;
    Ok(HttpRequest {
        method,
        path: path.to_string(),
        query: QueryParams::new(),
        headers: vec![(
            JSON_CONTENT_TYPE.0.to_string(),
            JSON_CONTENT_TYPE.1.to_string(),
        )],
        body: Some(body),
    })
}

fn build_remove(path: &str) -> Result<HttpRequest> {
    check_relative(path)?;
    Ok(HttpRequest {
        method: HttpMethod::Delete,
        path: path.to_string(),
        query: QueryParams::new(),
        headers: Vec::new(),
        body: None,
    })
}
