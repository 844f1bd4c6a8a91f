//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::entities::{
    AuthorRecord, CategoryRecord, ContactMessageRecord, PostRecord, SubscriberRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn duplicate(constraint: impl Into<String>) -> Self {
        Self::Duplicate {
            constraint: constraint.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub thumbnail: Option<String>,
    pub reading_time: i32,
    pub published: bool,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author_id: i32,
    pub category_id: i32,
    /// Stored as both `created_at` and `updated_at`.
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub thumbnail: Option<String>,
    pub reading_time: i32,
    pub published: bool,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author_id: i32,
    pub category_id: i32,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateAuthorParams {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSubscriberParams {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CreateContactMessageParams {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Every stored post, drafts included, in ascending id order.
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post_by_id(&self, id: i32) -> Result<Option<PostRecord>, RepoError>;

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    async fn delete_post(&self, id: i32) -> Result<(), RepoError>;

    /// Add one to the view counter and return the new value.
    async fn increment_views(&self, id: i32) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait AuthorsRepo: Send + Sync {
    async fn list_authors(&self) -> Result<Vec<AuthorRecord>, RepoError>;

    async fn find_author(&self, id: i32) -> Result<Option<AuthorRecord>, RepoError>;

    async fn create_author(&self, params: CreateAuthorParams) -> Result<AuthorRecord, RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_category(&self, id: i32) -> Result<Option<CategoryRecord>, RepoError>;

    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError>;
}

#[async_trait]
pub trait SubscribersRepo: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<SubscriberRecord>, RepoError>;

    async fn create_subscriber(
        &self,
        params: CreateSubscriberParams,
    ) -> Result<SubscriberRecord, RepoError>;

    async fn set_subscriber_active(
        &self,
        id: i32,
        active: bool,
    ) -> Result<SubscriberRecord, RepoError>;

    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, RepoError>;
}

#[async_trait]
pub trait ContactMessagesRepo: Send + Sync {
    async fn create_contact_message(
        &self,
        params: CreateContactMessageParams,
    ) -> Result<ContactMessageRecord, RepoError>;

    /// Newest first.
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessageRecord>, RepoError>;

    async fn mark_contact_message_read(
        &self,
        id: i32,
    ) -> Result<ContactMessageRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
