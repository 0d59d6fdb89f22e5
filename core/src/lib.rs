//! Layered test harness for a JSONPlaceholder-style posts API.
//!
//! # Overview
//! Scenarios talk to the service through three layers:
//! `PostsApi` (named domain operations) → `RequestGateway` (read / create /
//! replace / remove) → `Transport` (the only code doing network I/O).
//! Endpoints, payloads, expected statuses and sample ids come from one
//! immutable `Fixtures` value passed by reference.
//!
//! # Design
//! - Responses flow back unchanged; non-2xx statuses are data, and only
//!   failures with no response at all become `ApiError`.
//! - The transport is injected at construction, so each scenario can own an
//!   isolated client and cookie jar.
//! - Query values and payloads are typed; numeric values are converted to
//!   strings explicitly before they reach a query.

pub mod actions;
pub mod assertions;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod http;
pub mod transport;
pub mod types;

pub use actions::PostsApi;
pub use config::HarnessConfig;
pub use error::{ApiError, Result};
pub use fixtures::Fixtures;
pub use gateway::RequestGateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse, QueryParams};
pub use transport::{HttpTransport, Transport};
pub use types::{Comment, NewPost, Post, PostUpdate, User};
