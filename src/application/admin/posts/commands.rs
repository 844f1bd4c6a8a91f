use time::OffsetDateTime;
use tracing::info;

use crate::application::repos::{CreatePostParams, RepoError, UpdatePostParams};
use crate::domain::entities::{DEFAULT_READING_TIME_MINUTES, PostRecord};
use crate::domain::error::DomainError;
use crate::domain::excerpt::derive_excerpt;
use crate::domain::slug::{SlugAsyncError, SlugError, generate_unique_slug_async};
use crate::domain::validation::{normalize_tags, require_text};

use super::service::AdminPostService;
use super::types::{AdminPostError, PostCommand};

/// Validated form of a [`PostCommand`], minus the slug.
pub(super) struct PreparedPost {
    title: String,
    content: String,
    excerpt: String,
    thumbnail: Option<String>,
    reading_time: i32,
    published: bool,
    featured: bool,
    tags: Vec<String>,
    author_id: i32,
    category_id: i32,
}

impl PreparedPost {
    pub(super) fn title(&self) -> &str {
        &self.title
    }

    pub(super) fn into_create(self, slug: String, created_at: OffsetDateTime) -> CreatePostParams {
        CreatePostParams {
            title: self.title,
            slug,
            excerpt: Some(self.excerpt),
            content: self.content,
            thumbnail: self.thumbnail,
            reading_time: self.reading_time,
            published: self.published,
            featured: self.featured,
            tags: self.tags,
            author_id: self.author_id,
            category_id: self.category_id,
            created_at,
        }
    }

    pub(super) fn into_update(
        self,
        id: i32,
        slug: String,
        updated_at: OffsetDateTime,
    ) -> UpdatePostParams {
        UpdatePostParams {
            id,
            title: self.title,
            slug,
            excerpt: Some(self.excerpt),
            content: self.content,
            thumbnail: self.thumbnail,
            reading_time: self.reading_time,
            published: self.published,
            featured: self.featured,
            tags: self.tags,
            author_id: self.author_id,
            category_id: self.category_id,
            updated_at,
        }
    }
}

impl AdminPostService {
    pub async fn create_post(
        &self,
        actor: &str,
        command: PostCommand,
    ) -> Result<PostRecord, AdminPostError> {
        let prepared = self.prepare(command).await?;
        let slug = self.unique_slug(prepared.title(), None).await?;

        let params = prepared.into_create(slug, OffsetDateTime::now_utc());
        let post = self.writer.create_post(params).await?;

        info!(
            target = "kabar::application::admin::posts",
            actor = actor,
            post_id = post.id,
            slug = %post.slug,
            published = post.published,
            "post created"
        );

        Ok(post)
    }

    pub async fn update_post(
        &self,
        actor: &str,
        id: i32,
        command: PostCommand,
    ) -> Result<PostRecord, AdminPostError> {
        let existing = self.load_post(id).await?;
        let prepared = self.prepare(command).await?;

        let slug = if prepared.title() == existing.title {
            existing.slug.clone()
        } else {
            self.unique_slug(prepared.title(), Some(existing.id)).await?
        };

        let params = prepared.into_update(id, slug, OffsetDateTime::now_utc());
        let post = self.writer.update_post(params).await?;

        info!(
            target = "kabar::application::admin::posts",
            actor = actor,
            post_id = post.id,
            slug = %post.slug,
            previous_slug = %existing.slug,
            published = post.published,
            "post updated"
        );

        Ok(post)
    }

    pub async fn delete_post(&self, actor: &str, id: i32) -> Result<(), AdminPostError> {
        let existing = self.load_post(id).await?;
        self.writer.delete_post(id).await?;

        info!(
            target = "kabar::application::admin::posts",
            actor = actor,
            post_id = id,
            slug = %existing.slug,
            "post deleted"
        );

        Ok(())
    }

    pub(super) async fn prepare(
        &self,
        command: PostCommand,
    ) -> Result<PreparedPost, AdminPostError> {
        let title = require_text(&command.title, "title")?;
        let content = require_text(&command.content, "content")?;

        let reading_time = command.reading_time.unwrap_or(DEFAULT_READING_TIME_MINUTES);
        if reading_time <= 0 {
            return Err(DomainError::validation(
                "readingTime",
                "must be a positive number of minutes",
            )
            .into());
        }

        if self
            .categories
            .find_category(command.category_id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation("categoryId", "unknown category").into());
        }

        let author_id = command.author_id.unwrap_or(self.default_author_id);
        if self.authors.find_author(author_id).await?.is_none() {
            return Err(DomainError::validation("authorId", "unknown author").into());
        }

        let excerpt = match command.excerpt.as_deref().map(str::trim) {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
            _ => derive_excerpt(&content),
        };

        let thumbnail = command
            .thumbnail
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(PreparedPost {
            title,
            content,
            excerpt,
            thumbnail,
            reading_time,
            published: command.published.unwrap_or(true),
            featured: command.featured,
            tags: normalize_tags(&command.tags),
            author_id,
            category_id: command.category_id,
        })
    }

    /// Slug derived from `title` that no other post uses. `owner` may keep
    /// its own slug.
    async fn unique_slug(
        &self,
        title: &str,
        owner: Option<i32>,
    ) -> Result<String, AdminPostError> {
        let reader = self.reader.clone();
        let result = generate_unique_slug_async(title, move |candidate| {
            let reader = reader.clone();
            let candidate = candidate.to_string();
            async move {
                let existing = reader.find_post_by_slug(&candidate).await?;
                Ok::<bool, RepoError>(match existing {
                    Some(post) => Some(post.id) == owner,
                    None => true,
                })
            }
        })
        .await;

        match result {
            Ok(slug) => Ok(slug),
            Err(SlugAsyncError::Slug(
                SlugError::EmptyInput | SlugError::Unrepresentable { .. },
            )) => Err(DomainError::validation("title", "cannot be turned into a slug").into()),
            Err(SlugAsyncError::Slug(SlugError::Exhausted { base })) => {
                Err(DomainError::validation(
                    "title",
                    format!("too many posts already use the slug `{base}`"),
                )
                .into())
            }
            Err(SlugAsyncError::Predicate(err)) => Err(err.into()),
        }
    }
}
