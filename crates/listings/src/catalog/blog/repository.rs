use async_trait::async_trait;

use super::domain::{BlogPost, BlogPostId, BlogPostPatch, NewBlogPost};
use crate::storage::RepositoryError;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Newest first; `published` restricts to one publication state.
    async fn list_posts(&self, published: Option<bool>) -> Result<Vec<BlogPost>, RepositoryError>;

    async fn get_post(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError>;

    async fn insert_post(&self, post: NewBlogPost) -> Result<BlogPost, RepositoryError>;

    async fn update_post(
        &self,
        id: BlogPostId,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, RepositoryError>;

    async fn delete_post(&self, id: BlogPostId) -> Result<bool, RepositoryError>;
}
