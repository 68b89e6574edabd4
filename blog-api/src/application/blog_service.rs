use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::data::post_store::{NewPost, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSubmission};

const MENTOR_ROLE: &str = "mentor";

pub(crate) struct BlogService {
    store: Arc<dyn PostStore>,
}

impl BlogService {
    pub(crate) fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    // Role gate runs before any field check; the author id is always the
    // verified identity, never taken from the body.
    pub(crate) async fn create_post(
        &self,
        username: &str,
        role: &str,
        submission: PostSubmission,
    ) -> Result<String, DomainError> {
        if role != MENTOR_ROLE {
            return Err(DomainError::Forbidden);
        }

        let submission = submission.validate()?;

        let new_post = NewPost {
            author_id: username.to_string(),
            date: Utc::now().timestamp_millis(),
            title: submission.title,
            content: submission.content,
        };

        let id = self.store.insert(new_post).await?;
        info!("stored new post id# {id}");
        Ok(id)
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.store.list_all().await
    }
}
