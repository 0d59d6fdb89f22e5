//! Domain action layer: named operations over the posts API.
//!
//! # Design
//! `PostsApi` takes its transport at construction and wraps it in exactly one
//! `RequestGateway`, so every call made through an instance shares the same
//! base endpoint, headers and cookie jar. Each operation binds one endpoint
//! from the borrowed `Fixtures` to one gateway verb. Operations are stateless
//! and independent; ids are not validated here and unknown ones come back as
//! ordinary 404 responses.

use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::gateway::RequestGateway;
use crate::http::{HttpResponse, QueryParams};
use crate::transport::Transport;
use crate::types::{NewPost, PostUpdate};

pub struct PostsApi<'f, T> {
    gateway: RequestGateway<T>,
    fixtures: &'f Fixtures,
}

impl<'f, T: Transport> PostsApi<'f, T> {
    pub fn new(transport: T, fixtures: &'f Fixtures) -> Self {
        Self {
            gateway: RequestGateway::new(transport),
            fixtures,
        }
    }

    pub fn fixtures(&self) -> &'f Fixtures {
        self.fixtures
    }

    // --- posts ---

    pub async fn list_posts(&self, filter: Option<&QueryParams>) -> Result<HttpResponse> {
        self.gateway.read(self.fixtures.endpoints.posts, filter).await
    }

    pub async fn get_post_by_id(&self, id: u64) -> Result<HttpResponse> {
        self.gateway
            .read(&self.fixtures.endpoints.post_by_id(id), None)
            .await
    }

    pub async fn create_post(&self, payload: &NewPost) -> Result<HttpResponse> {
        self.gateway
            .create(self.fixtures.endpoints.posts, payload)
            .await
    }

    pub async fn replace_post(&self, id: u64, payload: &PostUpdate) -> Result<HttpResponse> {
        self.gateway
            .replace(&self.fixtures.endpoints.post_by_id(id), payload)
            .await
    }

    pub async fn delete_post_by_id(&self, id: u64) -> Result<HttpResponse> {
        self.gateway
            .remove(&self.fixtures.endpoints.post_by_id(id))
            .await
    }

    // --- comments ---

    pub async fn list_post_comments(&self, post_id: u64) -> Result<HttpResponse> {
        self.gateway
            .read(&self.fixtures.endpoints.post_comments(post_id), None)
            .await
    }

    pub async fn list_comments(&self, filter: Option<&QueryParams>) -> Result<HttpResponse> {
        self.gateway
            .read(self.fixtures.endpoints.comments, filter)
            .await
    }

    // --- users ---

    pub async fn list_users(&self) -> Result<HttpResponse> {
        self.gateway.read(self.fixtures.endpoints.users, None).await
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<HttpResponse> {
        self.gateway
            .read(&self.fixtures.endpoints.user_by_id(id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::RecordingTransport;
    use crate::http::HttpMethod;

    fn api(transport: &RecordingTransport) -> PostsApi<'static, RecordingTransport> {
        PostsApi::new(transport.clone(), Fixtures::shared())
    }

    #[tokio::test]
    async fn operations_map_to_endpoint_and_verb() {
        let transport = RecordingTransport::replying(200, "{}");
        let api = api(&transport);
        let fixtures = api.fixtures();

        api.list_posts(None).await.unwrap();
        api.get_post_by_id(3).await.unwrap();
        api.create_post(&fixtures.payloads.new_post).await.unwrap();
        api.replace_post(3, &fixtures.payloads.updated_post).await.unwrap();
        api.delete_post_by_id(3).await.unwrap();
        api.list_post_comments(3).await.unwrap();
        api.list_comments(None).await.unwrap();
        api.list_users().await.unwrap();
        api.get_user_by_id(2).await.unwrap();

        let sent: Vec<(HttpMethod, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            sent,
            vec![
                (HttpMethod::Get, "/posts".to_string()),
                (HttpMethod::Get, "/posts/3".to_string()),
                (HttpMethod::Post, "/posts".to_string()),
                (HttpMethod::Put, "/posts/3".to_string()),
                (HttpMethod::Delete, "/posts/3".to_string()),
                (HttpMethod::Get, "/posts/3/comments".to_string()),
                (HttpMethod::Get, "/comments".to_string()),
                (HttpMethod::Get, "/users".to_string()),
                (HttpMethod::Get, "/users/2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn list_posts_forwards_filter() {
        let transport = RecordingTransport::replying(200, "[]");
        let api = api(&transport);
        let filter = api.fixtures().queries.posts_by_user(4);

        api.list_posts(Some(&filter)).await.unwrap();

        assert_eq!(transport.requests()[0].query, filter);
    }

    #[tokio::test]
    async fn responses_pass_through_unchanged() {
        let transport = RecordingTransport::replying(404, r#"{"missing":true}"#);
        let api = api(&transport);

        let resp = api.get_post_by_id(0).await.unwrap();
        assert_eq!(resp, transport.reply);
    }
}
