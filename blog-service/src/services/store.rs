use crate::models::{BlogPost, BlogPostUpdate};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence for blog posts. Identifiers are assigned by the store.
#[async_trait]
pub trait BlogPostStore: Send + Sync {
    async fn list(&self) -> Result<Vec<BlogPost>, AppError>;

    async fn get(&self, id: ObjectId) -> Result<Option<BlogPost>, AppError>;

    /// Persists `post` and returns it with its assigned identifier.
    async fn create(&self, post: BlogPost) -> Result<BlogPost, AppError>;

    /// Sets only the fields present in `changes`. Returns `false` when no post
    /// has the given identifier.
    async fn update(&self, id: ObjectId, changes: BlogPostUpdate) -> Result<bool, AppError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
