use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;

use crate::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::PostRecord;

use super::{PostgresRepositories, map_sqlx_error};

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, thumbnail, reading_time, \
     published, featured, views, tags, author_id, category_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i32,
    title: String,
    slug: String,
    excerpt: Option<String>,
    content: String,
    thumbnail: Option<String>,
    reading_time: i32,
    published: bool,
    featured: bool,
    views: i64,
    tags: Json<Vec<String>>,
    author_id: i32,
    category_id: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            content: row.content,
            thumbnail: row.thumbnail,
            reading_time: row.reading_time,
            published: row.published,
            featured: row.featured,
            views: row.views,
            tags: row.tags.0,
            author_id: row.author_id,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_post_by_id(&self, id: i32) -> Result<Option<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let sql = format!(
            "INSERT INTO posts (title, slug, excerpt, content, thumbnail, reading_time, \
             published, featured, tags, author_id, category_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(params.title)
            .bind(params.slug)
            .bind(params.excerpt)
            .bind(params.content)
            .bind(params.thumbnail)
            .bind(params.reading_time)
            .bind(params.published)
            .bind(params.featured)
            .bind(Json(params.tags))
            .bind(params.author_id)
            .bind(params.category_id)
            .bind(params.created_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let sql = format!(
            "UPDATE posts SET title = $2, slug = $3, excerpt = $4, content = $5, \
             thumbnail = $6, reading_time = $7, published = $8, featured = $9, tags = $10, \
             author_id = $11, category_id = $12, updated_at = $13 \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(params.id)
            .bind(params.title)
            .bind(params.slug)
            .bind(params.excerpt)
            .bind(params.content)
            .bind(params.thumbnail)
            .bind(params.reading_time)
            .bind(params.published)
            .bind(params.featured)
            .bind(Json(params.tags))
            .bind(params.author_id)
            .bind(params.category_id)
            .bind(params.updated_at)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(PostRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn increment_views(&self, id: i32) -> Result<i64, RepoError> {
        let views: Option<i64> =
            sqlx::query_scalar("UPDATE posts SET views = views + 1 WHERE id = $1 RETURNING views")
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        views.ok_or(RepoError::NotFound)
    }
}
