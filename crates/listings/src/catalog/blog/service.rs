use std::sync::Arc;

use tracing::info;

use super::domain::{BlogPost, BlogPostDraft, BlogPostId, BlogPostPatch, ENTITY};
use super::repository::BlogRepository;
use crate::catalog::error::CatalogError;

pub struct BlogService<R> {
    repository: Arc<R>,
}

impl<R> BlogService<R>
where
    R: BlogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, published: Option<bool>) -> Result<Vec<BlogPost>, CatalogError> {
        Ok(self.repository.list_posts(published).await?)
    }

    pub async fn get(&self, id: BlogPostId) -> Result<BlogPost, CatalogError> {
        self.repository
            .get_post(id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })
    }

    pub async fn create(&self, draft: BlogPostDraft) -> Result<BlogPost, CatalogError> {
        let new = draft.validate()?;
        let post = self.repository.insert_post(new).await?;
        info!(id = %post.id, published = post.published, "blog post created");
        Ok(post)
    }

    pub async fn update(
        &self,
        id: BlogPostId,
        patch: BlogPostPatch,
    ) -> Result<BlogPost, CatalogError> {
        patch.validate()?;
        let post = self
            .repository
            .update_post(id, patch)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })?;
        info!(id = %post.id, "blog post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: BlogPostId) -> Result<(), CatalogError> {
        if self.repository.delete_post(id).await? {
            info!(%id, "blog post deleted");
            Ok(())
        } else {
            Err(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })
        }
    }
}
