use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) author_id: String,
    pub(crate) date: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

#[async_trait]
pub(crate) trait PostStore: Send + Sync {
    /// Inserts a new post and returns the backend-assigned document id.
    /// Always a fresh id; never an upsert.
    async fn insert(&self, input: NewPost) -> Result<String, DomainError>;

    /// Full-collection fetch in backend-native order; no sort applied.
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;
}
