use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Author {
    /// Display name: the present parts joined by a single space.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A blog post as stored in the `blogposts` collection.
///
/// `id` is `None` until the store has assigned one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bson::DateTime>,
}

impl BlogPost {
    pub fn new(
        title: String,
        content: String,
        author: Author,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: None,
            title,
            content,
            author,
            created: created.map(bson::DateTime::from_chrono),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.map(|created| created.to_chrono())
    }
}

/// The subset of fields a PUT may change. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    pub created: Option<DateTime<Utc>>,
}

impl BlogPostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.created.is_none()
    }

    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(created) = self.created {
            post.created = Some(bson::DateTime::from_chrono(created));
        }
    }

    /// The `$set` document for this update.
    pub fn to_set_document(&self) -> Result<bson::Document, bson::ser::Error> {
        let mut set = bson::Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(content) = &self.content {
            set.insert("content", content.as_str());
        }
        if let Some(author) = &self.author {
            set.insert("author", bson::to_bson(author)?);
        }
        if let Some(created) = self.created {
            set.insert("created", bson::DateTime::from_chrono(created));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn author(first: Option<&str>, last: Option<&str>) -> Author {
        Author {
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    fn sample_post() -> BlogPost {
        BlogPost::new(
            "First post".to_string(),
            "Hello".to_string(),
            author(Some("Ada"), Some("Lovelace")),
            None,
        )
    }

    #[test]
    fn full_name_joins_present_parts() {
        assert_eq!(author(Some("Ada"), Some("Lovelace")).full_name(), "Ada Lovelace");
        assert_eq!(author(Some("Ada"), None).full_name(), "Ada");
        assert_eq!(author(None, Some("Lovelace")).full_name(), "Lovelace");
        assert_eq!(author(Some("  "), Some("Lovelace")).full_name(), "Lovelace");
        assert_eq!(author(None, None).full_name(), "");
    }

    #[test]
    fn apply_changes_only_listed_fields() {
        let mut post = sample_post();
        let update = BlogPostUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };

        update.apply(&mut post);

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "Hello");
        assert_eq!(post.author, author(Some("Ada"), Some("Lovelace")));
        assert!(post.created.is_none());
    }

    #[test]
    fn author_update_replaces_whole_subdocument() {
        let mut post = sample_post();
        let update = BlogPostUpdate {
            author: Some(author(Some("Grace"), None)),
            ..Default::default()
        };

        update.apply(&mut post);

        assert_eq!(post.author, author(Some("Grace"), None));
    }

    #[test]
    fn set_document_contains_only_listed_fields() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let update = BlogPostUpdate {
            content: Some("Body".to_string()),
            author: Some(author(Some("Grace"), Some("Hopper"))),
            created: Some(created),
            ..Default::default()
        };

        let set = update.to_set_document().unwrap();

        assert!(!set.contains_key("title"));
        assert_eq!(set.get_str("content").unwrap(), "Body");
        let stored_author = set.get_document("author").unwrap();
        assert_eq!(stored_author.get_str("firstName").unwrap(), "Grace");
        assert_eq!(stored_author.get_str("lastName").unwrap(), "Hopper");
        assert_eq!(set.get_datetime("created").unwrap().to_chrono(), created);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(BlogPostUpdate::default().is_empty());
        assert!(!BlogPostUpdate {
            content: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn new_post_has_no_id_until_stored() {
        let post = sample_post();
        assert!(post.id.is_none());
        let document = bson::to_document(&post).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("created"));
    }
}
