//! Error types for the API harness.
//!
//! # Design
//! Only failures that prevent a response from existing are errors. A 4xx or
//! 5xx answer from the service is a normal `HttpResponse` and it is up to the
//! scenario to assert on its status. Transport failures are wrapped without
//! translation so the underlying cause stays visible in test output.

use thiserror::Error;

/// Result alias used throughout the harness.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the transport, gateway and configuration layers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP client failed before a response was received (connection
    /// refused, DNS failure, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A gateway path carried a scheme/host or did not start with `/`.
    #[error("path must be relative to the base endpoint, got {0:?}")]
    InvalidPath(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// An environment value was missing its expected shape.
    #[error("invalid configuration: {0}")]
    Config(String),
}
