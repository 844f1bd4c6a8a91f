//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

pub const DEFAULT_READING_TIME_MINUTES: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub thumbnail: Option<String>,
    pub reading_time: i32,
    pub published: bool,
    pub featured: bool,
    pub views: i64,
    pub tags: Vec<String>,
    pub author_id: i32,
    pub category_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A post joined with its author and category. Either side is `None` when
/// the referenced row no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: PostRecord,
    pub author: Option<AuthorRecord>,
    pub category: Option<CategoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: PostWithAuthor,
    pub related_posts: Vec<PostWithAuthor>,
}
