use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{AuthorsRepo, CreateAuthorParams, RepoError};
use crate::domain::entities::AuthorRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i32,
    name: String,
    bio: Option<String>,
    avatar: Option<String>,
    email: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<AuthorRow> for AuthorRecord {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            bio: row.bio,
            avatar: row.avatar,
            email: row.email,
            twitter: row.twitter,
            facebook: row.facebook,
            linkedin: row.linkedin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl AuthorsRepo for PostgresRepositories {
    async fn list_authors(&self) -> Result<Vec<AuthorRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, bio, avatar, email, twitter, facebook, linkedin, created_at, updated_at \
             FROM authors ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(AuthorRecord::from).collect())
    }

    async fn find_author(&self, id: i32) -> Result<Option<AuthorRecord>, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, bio, avatar, email, twitter, facebook, linkedin, created_at, updated_at \
             FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AuthorRecord::from))
    }

    async fn create_author(&self, params: CreateAuthorParams) -> Result<AuthorRecord, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "INSERT INTO authors (name, bio, avatar, email, twitter, facebook, linkedin) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, name, bio, avatar, email, twitter, facebook, linkedin, created_at, updated_at",
        )
        .bind(params.name)
        .bind(params.bio)
        .bind(params.avatar)
        .bind(params.email)
        .bind(params.twitter)
        .bind(params.facebook)
        .bind(params.linkedin)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
