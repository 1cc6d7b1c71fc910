//! Failure kinds of the posts API and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use posts_types::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Stored records failed validation on read.
    #[error("Invalid post data on server")]
    ServerIntegrity { invalid_ids: Vec<Option<u64>> },
}

impl PostError {
    pub fn post_not_found(id: u64) -> Self {
        PostError::NotFound(format!("Post with id {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PostError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound(_) => StatusCode::NOT_FOUND,
            PostError::ServerIntegrity { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorBody::new(self.to_string());
        if let PostError::ServerIntegrity { invalid_ids } = self {
            body.invalid_ids = Some(invalid_ids);
        }
        (status, Json(body)).into_response()
    }
}
