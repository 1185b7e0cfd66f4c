//! Locally persisted blog posts.
//!
//! The collection is read once from the `blogPosts` key and every successful
//! mutation writes the full list back before returning.

use crate::database::{Database, DatabaseError, POSTS_KEY};
use crate::models::Post;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCollection {
    posts: Vec<Post>,
    author: String,
    default_image: String,
}

impl PostCollection {
    /// Load the stored snapshot. A missing or unreadable snapshot yields an empty collection.
    pub fn load(db: &Database, author: &str, default_image: &str) -> Self {
        let posts = match db.get_item(POSTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => posts,
                Err(e) => {
                    tracing::warn!(error = %e, "post snapshot is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read post snapshot, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = posts.len(), "posts loaded");

        Self {
            posts,
            author: author.to_string(),
            default_image: default_image.to_string(),
        }
    }

    /// Create a post and put it first. Blank content is ignored and returns `None`.
    pub fn add(
        &mut self,
        db: &Database,
        content: &str,
        image: Option<&str>,
    ) -> Result<Option<Post>, DatabaseError> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let image = image
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_image)
            .to_string();
        let post = Post::new(content.to_string(), self.author.clone(), image);

        self.posts.insert(0, post.clone());
        if let Err(e) = self.persist(db) {
            self.posts.remove(0);
            return Err(e);
        }

        tracing::info!(id = %post.id, "post added");
        Ok(Some(post))
    }

    /// Remove the post with `id`. Returns `false` (and writes nothing) for unknown ids.
    pub fn remove(&mut self, db: &Database, id: &str) -> Result<bool, DatabaseError> {
        let Some(index) = self.posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let removed = self.posts.remove(index);
        if let Err(e) = self.persist(db) {
            self.posts.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id, "post removed");
        Ok(true)
    }

    fn persist(&self, db: &Database) -> Result<(), DatabaseError> {
        let snapshot = serde_json::to_string(&self.posts)?;
        db.set_item(POSTS_KEY, &snapshot)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "https://example.com/placeholder.png";

    fn collection(db: &Database) -> PostCollection {
        PostCollection::load(db, "Anonymous", IMAGE)
    }

    #[test]
    fn add_prepends_and_persists() {
        let db = Database::open_in_memory().unwrap();
        let mut posts = collection(&db);

        posts.add(&db, "first", None).unwrap();
        let second = posts.add(&db, "second", Some("https://img/2.png")).unwrap().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts.posts()[0].id, second.id);
        assert_eq!(second.image, "https://img/2.png");
        assert_eq!(posts.posts()[1].image, IMAGE);
        assert_eq!(posts.posts()[1].author, "Anonymous");

        let reloaded = collection(&db);
        assert_eq!(reloaded.posts(), posts.posts());
    }

    #[test]
    fn blank_content_is_ignored() {
        let db = Database::open_in_memory().unwrap();
        let mut posts = collection(&db);

        assert_eq!(posts.add(&db, "", None).unwrap(), None);
        assert_eq!(posts.add(&db, "   \n\t", None).unwrap(), None);
        assert!(posts.is_empty());
        assert_eq!(db.get_item(POSTS_KEY).unwrap(), None);
    }

    #[test]
    fn blank_image_falls_back_to_placeholder() {
        let db = Database::open_in_memory().unwrap();
        let mut posts = collection(&db);
        let post = posts.add(&db, "hi", Some("  ")).unwrap().unwrap();
        assert_eq!(post.image, IMAGE);
    }

    #[test]
    fn remove_drops_only_matching_post() {
        let db = Database::open_in_memory().unwrap();
        let mut posts = collection(&db);
        let keep = posts.add(&db, "keep", None).unwrap().unwrap();
        let drop = posts.add(&db, "drop", None).unwrap().unwrap();

        assert!(posts.remove(&db, &drop.id).unwrap());
        assert_eq!(posts.len(), 1);
        assert!(posts.get(&drop.id).is_none());
        assert!(posts.get(&keep.id).is_some());
        assert_eq!(collection(&db).len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let db = Database::open_in_memory().unwrap();
        let mut posts = collection(&db);
        posts.add(&db, "only", None).unwrap();
        let before = posts.clone();

        assert!(!posts.remove(&db, "not-an-id").unwrap());
        assert_eq!(posts, before);
    }

    #[test]
    fn malformed_snapshot_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(POSTS_KEY, "{not json").unwrap();
        assert!(collection(&db).is_empty());
    }

    #[test]
    fn reads_snapshot_written_by_web_client() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(
            POSTS_KEY,
            r#"[{"id":"a1","content":"Leg day","author":"Anonymous","image":"x.png","timestamp":"3/1/2024, 9:00:00 AM"}]"#,
        )
        .unwrap();

        let posts = collection(&db);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts.posts()[0].content, "Leg day");
    }
}
