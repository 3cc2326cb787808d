use crate::models::{Author, BlogPost, BlogPostUpdate};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Serialization view of a stored post. The author is flattened to a
/// display name.
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl From<BlogPost> for BlogPostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            author: post.author.full_name(),
            created: post
                .created_at()
                .map(|created| created.to_rfc3339_opts(SecondsFormat::Millis, true)),
            title: post.title,
            content: post.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPostListResponse {
    pub blogposts: Vec<BlogPostResponse>,
}

/// Empty or whitespace-only strings count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body of `POST /blog-posts`. Presence of the required fields is checked by
/// [`CreateBlogPostRequest::into_post`] so the caller learns which one is missing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogPostRequest {
    pub title: Option<String>,
    pub author: Option<Author>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl CreateBlogPostRequest {
    /// Builds the post to store, stamping `now` when no creation time was sent.
    /// Fails with the name of the first missing required field.
    pub fn into_post(self, now: DateTime<Utc>) -> Result<BlogPost, &'static str> {
        let Some(title) = non_blank(self.title) else {
            return Err("title");
        };
        let Some(author) = self.author else {
            return Err("author");
        };
        let Some(content) = non_blank(self.content) else {
            return Err("content");
        };

        Ok(BlogPost::new(
            title,
            content,
            author,
            Some(self.created.unwrap_or(now)),
        ))
    }
}

/// Body of `PUT /blog-posts/:id`. `id` must repeat the path identifier.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogPostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<Author>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl UpdateBlogPostRequest {
    pub fn matches_path(&self, path_id: &str) -> bool {
        !path_id.is_empty() && self.id.as_deref() == Some(path_id)
    }

    pub fn into_update(self) -> BlogPostUpdate {
        BlogPostUpdate {
            title: self.title,
            content: self.content,
            author: self.author,
            created: self.created,
        }
    }
}
