//! Fixture registry: endpoints, query builders, payloads, expected statuses
//! and sample identifiers shared by the action layer and the scenarios.
//!
//! # Design
//! `Fixtures` is an immutable value. It is built once (`Fixtures::shared`
//! caches one per process) and handed out by reference, so every consumer
//! sees the same data and nothing can change it mid-run. Templated endpoints
//! are plain methods doing string interpolation; none of them allocate state.

use std::sync::OnceLock;

use crate::http::QueryParams;
use crate::types::{NewPost, PostUpdate};

/// Relative resource paths. None of them carry a scheme or host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub posts: &'static str,
    pub comments: &'static str,
    pub users: &'static str,
}

impl Endpoints {
    pub fn post_by_id(&self, id: u64) -> String {
        format!("{}/{id}", self.posts)
    }

    pub fn post_comments(&self, id: u64) -> String {
        format!("{}/{id}{}", self.posts, self.comments)
    }

    pub fn user_by_id(&self, id: u64) -> String {
        format!("{}/{id}", self.users)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            posts: "/posts",
            comments: "/comments",
            users: "/users",
        }
    }
}

/// Builders for the filters the service understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryBuilders;

impl QueryBuilders {
    pub fn posts_by_user(&self, user_id: u64) -> QueryParams {
        QueryParams::new().with("userId", user_id.to_string())
    }

    pub fn comments_by_post(&self, post_id: u64) -> QueryParams {
        QueryParams::new().with("postId", post_id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payloads {
    pub new_post: NewPost,
    pub updated_post: PostUpdate,
}

impl Default for Payloads {
    fn default() -> Self {
        Self {
            new_post: NewPost {
                title: "Playwright API Test".to_string(),
                body: "Refactored API test payload".to_string(),
                user_id: 1,
            },
            updated_post: PostUpdate {
                id: 1,
                title: "Replaced API Test".to_string(),
                body: "Full replacement payload".to_string(),
                user_id: 1,
            },
        }
    }
}

/// Status codes scenarios assert against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedStatus {
    /// Successful GET, PUT and DELETE.
    pub ok: u16,
    /// Successful POST.
    pub created: u16,
    pub not_found: u16,
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        Self {
            ok: 200,
            created: 201,
            not_found: 404,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleIds {
    pub post_id: u64,
    pub user_id: u64,
    /// Outside the service's id space; lookups answer 404.
    pub missing_post_id: u64,
}

impl Default for SampleIds {
    fn default() -> Self {
        Self {
            post_id: 1,
            user_id: 1,
            missing_post_id: 9_999,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub endpoints: Endpoints,
    pub queries: QueryBuilders,
    pub payloads: Payloads,
    pub expected_status: ExpectedStatus,
    pub sample_ids: SampleIds,
}

impl Fixtures {
    /// Process-wide instance, built on first use and never mutated.
    pub fn shared() -> &'static Fixtures {
        static FIXTURES: OnceLock<Fixtures> = OnceLock::new();
        FIXTURES.get_or_init(Fixtures::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_endpoints_interpolate_id() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.post_by_id(1), "/posts/1");
        assert_eq!(endpoints.post_comments(7), "/posts/7/comments");
        assert_eq!(endpoints.user_by_id(3), "/users/3");
    }

    #[test]
    fn endpoints_are_relative() {
        let endpoints = Endpoints::default();
        for path in [
            endpoints.posts.to_string(),
            endpoints.comments.to_string(),
            endpoints.users.to_string(),
            endpoints.post_by_id(42),
        ] {
            assert!(path.starts_with('/'), "{path}");
            assert!(!path.contains("://"), "{path}");
        }
    }

    #[test]
    fn query_builders_stringify_ids() {
        let queries = QueryBuilders;
        assert_eq!(queries.posts_by_user(1).get("userId"), Some("1"));
        assert_eq!(queries.comments_by_post(12).get("postId"), Some("12"));
    }

    #[test]
    fn new_post_payload_matches_wire_shape() {
        let value = serde_json::to_value(&Payloads::default().new_post).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Playwright API Test",
                "body": "Refactored API test payload",
                "userId": 1
            })
        );
    }

    #[test]
    fn shared_returns_same_instance() {
        let a = Fixtures::shared() as *const Fixtures;
        let b = Fixtures::shared() as *const Fixtures;
        assert_eq!(a, b);
        assert_eq!(Fixtures::shared().expected_status.created, 201);
    }
}
