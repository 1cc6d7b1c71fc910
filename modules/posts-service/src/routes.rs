//! Axum route handlers for the posts HTTP API.

use crate::error::PostError;
use crate::search;
use crate::store::PostStore;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use posts_types::*;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub store: Arc<PostStore>,
    pub search_mode: SearchMode,
    pub start_time: Instant,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/search", get(search_posts))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/status", get(status))
        .with_state(state)
        .layer(cors)
}

fn parse_id(raw: &str) -> Result<u64, PostError> {
    raw.parse()
        .map_err(|_| PostError::BadRequest(format!("Invalid post id: {}", raw)))
}

fn parse_body(body: &Bytes) -> Result<Value, PostError> {
    serde_json::from_slice(body)
        .map_err(|e| PostError::BadRequest(format!("Invalid JSON body: {}", e)))
}

// GET /posts
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Post>>, PostError> {
    state.store.list().map(Json)
}

// POST /posts
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Post>), PostError> {
    let payload = parse_body(&body)?;
    let post = state.store.create(payload)?;
    Ok((StatusCode::CREATED, Json(post)))
}

// GET /posts/:id
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, PostError> {
    let id = parse_id(&id)?;
    state.store.find_by_id(id).map(Json)
}

// PUT /posts/:id
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Post>, PostError> {
    let id = parse_id(&id)?;
    // Unknown ids are reported before the body is looked at.
    state.store.find_by_id(id)?;

    let patch = match parse_body(&body)? {
        Value::Object(fields) if !fields.is_empty() => PostPatch::from_fields(&fields),
        _ => {
            return Err(PostError::BadRequest(
                "Update body must be a non-empty JSON object".to_string(),
            ));
        }
    };
    state.store.update(id, &patch).map(Json)
}

// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, PostError> {
    let id = parse_id(&id)?;
    state.store.delete(id).map(Json)
}

// GET /posts/search?title=&content=
pub async fn search_posts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Post>>, PostError> {
    let Query(params) = query.map_err(|e| PostError::BadRequest(e.body_text()))?;
    state
        .store
        .read(|posts| search::search(posts, &params, state.search_mode))
        .map(Json)
}

// GET /status
pub async fn status(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ServiceStatus>) {
    (
        StatusCode::OK,
        Json(ServiceStatus {
            running: true,
            uptime_secs: state.start_time.elapsed().as_secs(),
            total_posts: state.store.len(),
            search_mode: state.search_mode,
        }),
    )
}
