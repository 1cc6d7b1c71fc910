//! Shallow schema check for post payloads.
//!
//! Only key presence is checked: values are not type-checked and empty
//! strings are accepted.

use posts_types::Post;
use serde_json::{Map, Value};

/// Returns true when `candidate` is a JSON object with `title` and `content` keys.
pub fn validate(candidate: &Value) -> bool {
    candidate.as_object().is_some_and(has_required_keys)
}

/// Same check applied to a record already held by the store.
pub fn is_valid_post(post: &Post) -> bool {
    has_required_keys(post.fields())
}

fn has_required_keys(fields: &Map<String, Value>) -> bool {
    fields.contains_key("title") && fields.contains_key("content")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_title_and_content() {
        assert!(validate(&json!({"title": "t", "content": "c"})));
        assert!(validate(&json!({"title": "t", "content": "c", "extra": true})));
    }

    #[test]
    fn test_values_are_not_checked() {
        assert!(validate(&json!({"title": "", "content": ""})));
        assert!(validate(&json!({"title": 5, "content": null})));
    }

    #[test]
    fn test_rejects_missing_keys() {
        assert!(!validate(&json!({"title": "t"})));
        assert!(!validate(&json!({"content": "c"})));
        assert!(!validate(&json!({})));
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(!validate(&json!(["title", "content"])));
        assert!(!validate(&json!("title")));
        assert!(!validate(&Value::Null));
    }

    #[test]
    fn test_stored_post_check() {
        let good: Post = serde_json::from_value(json!({"id": 1, "title": "a", "content": "b"})).unwrap();
        let bad: Post = serde_json::from_value(json!({"id": 2, "title": "a"})).unwrap();
        assert!(is_valid_post(&good));
        assert!(!is_valid_post(&bad));
    }
}
