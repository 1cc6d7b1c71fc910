//! Environment-driven settings for the posts service.

use posts_types::{Post, SearchMode};
use serde_json::json;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub search_mode: SearchMode,
    pub seed_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("POSTS_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = get("POSTS_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(5002);

        let search_mode = match get("POSTS_SEARCH_MODE") {
            Some(raw) => raw.parse::<SearchMode>().unwrap_or_else(|e| {
                log::warn!("{}, falling back to '{}'", e, SearchMode::Parity);
                SearchMode::Parity
            }),
            None => SearchMode::default(),
        };

        let seed_path = get("POSTS_SEED_PATH").filter(|p| !p.is_empty());

        Self {
            host,
            port,
            search_mode,
            seed_path,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Initial collection: the seed file when configured, the built-in posts otherwise.
    pub fn load_seed(&self) -> Result<Vec<Post>, String> {
        match &self.seed_path {
            Some(path) => load_seed_file(path),
            None => Ok(default_posts()),
        }
    }
}

/// Reads a JSON array of post objects. Objects are taken verbatim, missing
/// keys included; an element that is not an object rejects the whole file.
pub fn load_seed_file(path: &str) -> Result<Vec<Post>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read seed file {}: {}", path, e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Failed to parse seed file {}: {}", path, e))
}

pub fn default_posts() -> Vec<Post> {
    [
        json!({"id": 1, "title": "First post", "content": "This is the first post."}),
        json!({"id": 2, "title": "Second post", "content": "This is the second post."}),
    ]
    .into_iter()
    .filter_map(|v| match v {
        serde_json::Value::Object(fields) => Some(Post::from_fields(fields)),
        _ => None,
    })
    .collect()
}
