//! Case-insensitive substring search over post titles and contents.

use crate::error::PostError;
use posts_types::{Post, SearchMode, SearchParams};
use serde_json::Value;

/// Lowercased, non-empty query terms.
struct Query {
    title: Option<String>,
    content: Option<String>,
}

impl Query {
    fn from_params(params: &SearchParams) -> Option<Self> {
        let normalize = |q: &Option<String>| {
            q.as_deref()
                .filter(|q| !q.is_empty())
                .map(str::to_lowercase)
        };
        let query = Self {
            title: normalize(&params.title),
            content: normalize(&params.content),
        };
        if query.title.is_none() && query.content.is_none() {
            return None;
        }
        Some(query)
    }

    fn matches(&self, post: &Post) -> bool {
        let title_hit = self
            .title
            .as_deref()
            .is_some_and(|q| contains_ignore_case(post.title(), q));
        let content_hit = self
            .content
            .as_deref()
            .is_some_and(|q| contains_ignore_case(post.content(), q));
        title_hit || content_hit
    }
}

/// Only string fields can match; anything else is treated as a miss.
fn contains_ignore_case(field: Option<&Value>, needle: &str) -> bool {
    match field {
        Some(Value::String(s)) => s.to_lowercase().contains(needle),
        _ => false,
    }
}

/// Searches `posts` in collection order.
///
/// In [`SearchMode::Parity`] the scan stops at the first post that does not
/// match and the whole search fails with not-found, even if earlier posts
/// matched. [`SearchMode::Filter`] returns every match and fails only when
/// there are none.
pub fn search(
    posts: &[Post],
    params: &SearchParams,
    mode: SearchMode,
) -> Result<Vec<Post>, PostError> {
    let query = Query::from_params(params).ok_or_else(|| {
        PostError::BadRequest(
            "At least one of 'title' or 'content' query parameters is required".to_string(),
        )
    })?;

    let mut results = Vec::new();
    for post in posts {
        if query.matches(post) {
            results.push(post.clone());
            continue;
        }
        if mode == SearchMode::Parity {
            log::debug!("Search aborted at non-matching post {:?}", post.id());
            return Err(no_matches());
        }
    }

    if mode == SearchMode::Filter && results.is_empty() {
        return Err(no_matches());
    }
    log::debug!("Search returned {} posts", results.len());
    Ok(results)
}

fn no_matches() -> PostError {
    PostError::NotFound("No posts found matching the search criteria".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts() -> Vec<Post> {
        vec![
            serde_json::from_value(
                json!({"id": 1, "title": "First post", "content": "This is the first post."}),
            )
            .unwrap(),
            serde_json::from_value(
                json!({"id": 2, "title": "Second post", "content": "This is the second post."}),
            )
            .unwrap(),
        ]
    }

    fn params(title: Option<&str>, content: Option<&str>) -> SearchParams {
        SearchParams {
            title: title.map(String::from),
            content: content.map(String::from),
        }
    }

    fn ids(result: &[Post]) -> Vec<Option<u64>> {
        result.iter().map(Post::id).collect()
    }

    #[test]
    fn test_requires_a_query() {
        for p in [params(None, None), params(Some(""), Some(""))] {
            for mode in [SearchMode::Parity, SearchMode::Filter] {
                assert!(matches!(
                    search(&posts(), &p, mode),
                    Err(PostError::BadRequest(_))
                ));
            }
        }
    }

    #[test]
    fn test_parity_aborts_on_first_non_match() {
        // post 1 matches but post 2 does not
        let result = search(&posts(), &params(Some("first"), None), SearchMode::Parity);
        assert!(matches!(result, Err(PostError::NotFound(_))));
    }

    #[test]
    fn test_parity_succeeds_when_every_post_matches() {
        let result = search(&posts(), &params(Some("POST"), None), SearchMode::Parity).unwrap();
        assert_eq!(ids(&result), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_parity_on_empty_collection_returns_nothing() {
        let result = search(&[], &params(Some("x"), None), SearchMode::Parity).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_collects_all_matches() {
        let result = search(&posts(), &params(Some("first"), None), SearchMode::Filter).unwrap();
        assert_eq!(ids(&result), vec![Some(1)]);
    }

    #[test]
    fn test_filter_without_matches_is_not_found() {
        let result = search(&posts(), &params(Some("third"), None), SearchMode::Filter);
        assert!(matches!(result, Err(PostError::NotFound(_))));
    }

    #[test]
    fn test_title_or_content_either_matches() {
        let result = search(
            &posts(),
            &params(Some("first"), Some("SECOND post.")),
            SearchMode::Parity,
        )
        .unwrap();
        assert_eq!(ids(&result), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_empty_title_query_is_ignored() {
        let result = search(&posts(), &params(Some(""), Some("second")), SearchMode::Filter).unwrap();
        assert_eq!(ids(&result), vec![Some(2)]);
    }

    #[test]
    fn test_non_string_fields_never_match() {
        let posts: Vec<Post> =
            vec![serde_json::from_value(json!({"id": 1, "title": 42, "content": null})).unwrap()];
        let result = search(&posts, &params(Some("42"), None), SearchMode::Filter);
        assert!(matches!(result, Err(PostError::NotFound(_))));
    }
}
