use crate::models::{BlogPost, BlogPostUpdate};
use crate::services::BlogPostStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const BLOG_POSTS_COLLECTION: &str = "blogposts";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn blog_posts(&self) -> Collection<BlogPost> {
        self.db.collection(BLOG_POSTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl BlogPostStore for MongoDb {
    async fn list(&self) -> Result<Vec<BlogPost>, AppError> {
        let find_options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let mut cursor = self.blog_posts().find(None, find_options).await?;

        let mut posts = Vec::new();
        while let Some(post) = cursor.try_next().await? {
            posts.push(post);
        }
        Ok(posts)
    }

    async fn get(&self, id: ObjectId) -> Result<Option<BlogPost>, AppError> {
        Ok(self.blog_posts().find_one(doc! { "_id": id }, None).await?)
    }

    async fn create(&self, mut post: BlogPost) -> Result<BlogPost, AppError> {
        post.id = None;
        let result = self.blog_posts().insert_one(&post, None).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "MongoDB returned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })?;
        tracing::info!(blog_post_id = %id, "Blog post created");
        post.id = Some(id);
        Ok(post)
    }

    async fn update(&self, id: ObjectId, changes: BlogPostUpdate) -> Result<bool, AppError> {
        if changes.is_empty() {
            return Ok(self.get(id).await?.is_some());
        }

        let set = changes.to_set_document().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to serialize update: {}", e))
        })?;

        let result = self
            .blog_posts()
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .blog_posts()
            .delete_one(doc! { "_id": id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
