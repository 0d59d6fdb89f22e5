use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const USER_COUNT: u64 = 10;
pub const POSTS_PER_USER: u64 = 10;
pub const COMMENTS_PER_POST: u64 = 5;
pub const POST_COUNT: u64 = USER_COUNT * POSTS_PER_USER;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// A stored post. Writes keep every field the client sent, so a created or
/// replaced post echoes its payload plus `id`.
pub type Record = Map<String, Value>;

impl From<Post> for Record {
    fn from(post: Post) -> Self {
        let mut record = Record::new();
        record.insert("userId".to_string(), post.user_id.into());
        record.insert("id".to_string(), post.id.into());
        record.insert("title".to_string(), post.title.into());
        record.insert("body".to_string(), post.body.into());
        record
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    posts: BTreeMap<u64, Record>,
    comments: Vec<Comment>,
    users: Vec<User>,
    next_post_id: u64,
}

impl Dataset {
    /// Deterministic seed: every user owns `POSTS_PER_USER` posts and every
    /// post has `COMMENTS_PER_POST` comments.
    pub fn seeded() -> Self {
        let users = (1..=USER_COUNT)
            .map(|id| User {
                id,
                name: format!("User {id}"),
                username: format!("user{id}"),
                email: format!("user{id}@example.com"),
            })
            .collect();
        let posts = (1..=POST_COUNT)
            .map(|id| {
                let post = Post {
                    user_id: (id - 1) / POSTS_PER_USER + 1,
                    id,
                    title: format!("post {id} title"),
                    body: format!("body of post {id}"),
                };
                (id, Record::from(post))
            })
            .collect();
        let comments = (1..=POST_COUNT * COMMENTS_PER_POST)
            .map(|id| Comment {
                post_id: (id - 1) / COMMENTS_PER_POST + 1,
                id,
                name: format!("comment {id}"),
                email: format!("commenter{id}@example.com"),
                body: format!("body of comment {id}"),
            })
            .collect();
        Self {
            posts,
            comments,
            users,
            next_post_id: POST_COUNT + 1,
        }
    }
}

pub type Db = Arc<RwLock<Dataset>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Dataset::seeded()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(replace_post).delete(delete_post),
        )
        .route("/posts/{id}/comments", get(list_post_comments))
        .route("/comments", get(list_comments))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Filter = HashMap<String, String>;
type NotFound = (StatusCode, Json<Value>);

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

/// Every query key must name a field whose value, rendered as a string,
/// equals the query value.
fn matches_filter<T: Serialize>(item: &T, filter: &Filter) -> bool {
    if filter.is_empty() {
        return true;
    }
    let Ok(Value::Object(fields)) = serde_json::to_value(item) else {
        return false;
    };
    filter.iter().all(|(key, want)| match fields.get(key) {
        Some(Value::String(have)) => have == want,
        Some(Value::Number(have)) => have.to_string() == *want,
        Some(Value::Bool(have)) => have.to_string() == *want,
        _ => false,
    })
}

fn filtered<'a, T: Serialize + Clone + 'a>(
    items: impl Iterator<Item = &'a T>,
    filter: &Filter,
) -> Vec<T> {
    items
        .filter(|item| matches_filter(*item, filter))
        .cloned()
        .collect()
}

async fn list_posts(State(db): State<Db>, Query(filter): Query<Filter>) -> Json<Vec<Record>> {
    debug!(?filter, "list posts");
    let data = db.read().await;
    Json(filtered(data.posts.values(), &filter))
}

/// Stores the body as sent, with `id` set to the next free id.
async fn create_post(
    State(db): State<Db>,
    Json(mut record): Json<Record>,
) -> (StatusCode, Json<Record>) {
    let mut data = db.write().await;
    let id = data.next_post_id;
    data.next_post_id += 1;
    record.insert("id".to_string(), id.into());
    data.posts.insert(id, record.clone());
    debug!(id, "created post");
    (StatusCode::CREATED, Json(record))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Record>, NotFound> {
    debug!(id, "get post");
    let data = db.read().await;
    data.posts.get(&id).cloned().map(Json).ok_or_else(not_found)
}

/// Replaces the stored post with the body as sent; `id` always comes from
/// the path.
async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(mut record): Json<Record>,
) -> Result<Json<Record>, NotFound> {
    let mut data = db.write().await;
    let post = data.posts.get_mut(&id).ok_or_else(not_found)?;
    record.insert("id".to_string(), id.into());
    *post = record;
    debug!(id, "replaced post");
    Ok(Json(post.clone()))
}

/// Answers 200 with `{}` whether or not the post existed.
async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Json<Value> {
    let removed = db.write().await.posts.remove(&id).is_some();
    debug!(id, removed, "delete post");
    Json(json!({}))
}

async fn list_post_comments(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Comment>> {
    debug!(id, "list post comments");
    let data = db.read().await;
    Json(
        data.comments
            .iter()
            .filter(|c| c.post_id == id)
            .cloned()
            .collect(),
    )
}

async fn list_comments(State(db): State<Db>, Query(filter): Query<Filter>) -> Json<Vec<Comment>> {
    debug!(?filter, "list comments");
    let data = db.read().await;
    Json(filtered(data.comments.iter(), &filter))
}

async fn list_users(State(db): State<Db>, Query(filter): Query<Filter>) -> Json<Vec<User>> {
    debug!(?filter, "list users");
    let data = db.read().await;
    Json(filtered(data.users.iter(), &filter))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, NotFound> {
    debug!(id, "get user");
    let data = db.read().await;
    data.users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}
