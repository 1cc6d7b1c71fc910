//! In-memory post collection.
//!
//! The store is the only owner of post state. Every operation takes the
//! collection lock once, so a create, update or delete (and the validation
//! pass of a listing) is never interleaved with another request.

use crate::error::PostError;
use crate::validate::{is_valid_post, validate};
use parking_lot::Mutex;
use posts_types::{DeleteConfirmation, Post, PostPatch};
use serde_json::Value;

pub struct PostStore {
    posts: Mutex<Vec<Post>>,
}

impl PostStore {
    /// Builds a store holding `seed` as-is. Seed records are not validated
    /// here; a bad seed surfaces as an integrity failure on listing.
    pub fn new(seed: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.lock().len()
    }

    /// All posts in insertion order, provided every one of them still passes validation.
    pub fn list(&self) -> Result<Vec<Post>, PostError> {
        let posts = self.posts.lock();
        let invalid_ids: Vec<Option<u64>> = posts
            .iter()
            .filter(|p| !is_valid_post(p))
            .map(Post::id)
            .collect();
        if !invalid_ids.is_empty() {
            log::warn!("Stored posts failed validation: {:?}", invalid_ids);
            return Err(PostError::ServerIntegrity { invalid_ids });
        }
        Ok(posts.clone())
    }

    pub fn create(&self, payload: Value) -> Result<Post, PostError> {
        if !validate(&payload) {
            return Err(invalid_payload());
        }
        let Value::Object(fields) = payload else {
            return Err(invalid_payload());
        };

        let mut posts = self.posts.lock();
        let id = next_id(&posts)?;
        let mut post = Post::from_fields(fields);
        post.set_id(id);
        posts.push(post.clone());
        log::info!("Created post {:?}", post.id());
        Ok(post)
    }

    pub fn find_by_id(&self, id: u64) -> Result<Post, PostError> {
        self.posts
            .lock()
            .iter()
            .find(|p| p.id() == Some(id))
            .cloned()
            .ok_or_else(|| PostError::post_not_found(id))
    }

    pub fn delete(&self, id: u64) -> Result<DeleteConfirmation, PostError> {
        let mut posts = self.posts.lock();
        let index = posts
            .iter()
            .position(|p| p.id() == Some(id))
            .ok_or_else(|| PostError::post_not_found(id))?;
        posts.remove(index);
        log::info!("Deleted post {}", id);
        Ok(DeleteConfirmation::new(id))
    }

    pub fn update(&self, id: u64, patch: &PostPatch) -> Result<Post, PostError> {
        let mut posts = self.posts.lock();
        let post = posts
            .iter_mut()
            .find(|p| p.id() == Some(id))
            .ok_or_else(|| PostError::post_not_found(id))?;
        post.apply(patch);
        log::info!("Updated post {}", id);
        Ok(post.clone())
    }

    /// Runs `f` over the collection while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&[Post]) -> R) -> R {
        f(&self.posts.lock())
    }
}

fn invalid_payload() -> PostError {
    PostError::BadRequest("Invalid post data: 'title' and 'content' are required".to_string())
}

/// One past the highest id currently held, starting at 1 for an empty store.
/// A stored id of `u64::MAX` leaves no room and is reported as bad server data.
fn next_id(posts: &[Post]) -> Result<u64, PostError> {
    let max = posts.iter().filter_map(Post::id).max().unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        log::warn!("Post id space exhausted at {}", max);
        PostError::ServerIntegrity {
            invalid_ids: vec![Some(max)],
        }
    })
}
