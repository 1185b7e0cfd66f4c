use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A blog post. Field names match the JSON snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub author: String,
    pub image: String,
    pub timestamp: String,
}

impl Post {
    pub fn new(content: String, author: String, image: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            author,
            image,
            timestamp: crate::utils::local_timestamp(),
        }
    }
}

/// A logged day of progress. `bmi` is derived from `weight` at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: i64,
    pub date: String, // YYYY-MM-DD
    pub weight: f64,
    pub calories: f64,
    pub steps: u64,
    pub diet: f64,
    pub water: f64,
    pub sleep: f64,
    pub workout: f64,
    pub bmi: f64,
}

/// One of the three moods the calendar accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Ok,
    Sad,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Ok, Mood::Sad];

    pub fn symbol(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Ok => "😐",
            Mood::Sad => "😞",
        }
    }

    /// Accepts the symbol itself or its word form
    pub fn parse(input: &str) -> Option<Mood> {
        match input.trim().to_lowercase().as_str() {
            "😊" | "happy" => Some(Mood::Happy),
            "😐" | "ok" => Some(Mood::Ok),
            "😞" | "sad" => Some(Mood::Sad),
            _ => None,
        }
    }
}

/// Form-level validation failure, reported inline to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_posts_get_distinct_ids() {
        let a = Post::new("a".into(), "Anonymous".into(), "img".into());
        let b = Post::new("b".into(), "Anonymous".into(), "img".into());
        assert_ne!(a.id, b.id);
        assert!(!a.timestamp.is_empty());
    }

    #[test]
    fn post_json_uses_snapshot_field_names() {
        let post = Post {
            id: "1".into(),
            content: "hello".into(),
            author: "Anonymous".into(),
            image: "img".into(),
            timestamp: "1/2/2024, 3:04:05 PM".into(),
        };
        let value = serde_json::to_value(&post).unwrap();
        for key in ["id", "content", "author", "image", "timestamp"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn mood_parses_symbols_and_words() {
        assert_eq!(Mood::parse("😊"), Some(Mood::Happy));
        assert_eq!(Mood::parse(" OK "), Some(Mood::Ok));
        assert_eq!(Mood::parse("sad"), Some(Mood::Sad));
        assert_eq!(Mood::parse("🤷"), None);
        for mood in Mood::ALL {
            assert_eq!(Mood::parse(mood.symbol()), Some(mood));
        }
    }
}
