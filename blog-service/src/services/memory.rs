use crate::models::{BlogPost, BlogPostUpdate};
use crate::services::BlogPostStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store, kept in insertion order. Used by the `memory`
/// backend and by tests that should not need a MongoDB server.
#[derive(Default)]
pub struct InMemoryStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<BlogPost>>, AppError> {
        self.posts
            .read()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<BlogPost>>, AppError> {
        self.posts
            .write()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl BlogPostStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.read()?.clone())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<BlogPost>, AppError> {
        Ok(self.read()?.iter().find(|post| post.id == Some(id)).cloned())
    }

    async fn create(&self, mut post: BlogPost) -> Result<BlogPost, AppError> {
        post.id = Some(ObjectId::new());
        self.write()?.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: ObjectId, changes: BlogPostUpdate) -> Result<bool, AppError> {
        let mut posts = self.write()?;
        match posts.iter_mut().find(|post| post.id == Some(id)) {
            Some(post) => {
                changes.apply(post);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut posts = self.write()?;
        let before = posts.len();
        posts.retain(|post| post.id != Some(id));
        Ok(posts.len() < before)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
