use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{CreateSubscriberParams, RepoError, SubscribersRepo};
use crate::domain::entities::SubscriberRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i32,
    name: String,
    email: String,
    active: bool,
    created_at: OffsetDateTime,
}

impl From<SubscriberRow> for SubscriberRecord {
    fn from(row: SubscriberRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SubscribersRepo for PostgresRepositories {
    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<SubscriberRecord>, RepoError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, name, email, active, created_at FROM subscribers \
             WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SubscriberRecord::from))
    }

    async fn create_subscriber(
        &self,
        params: CreateSubscriberParams,
    ) -> Result<SubscriberRecord, RepoError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "INSERT INTO subscribers (name, email) VALUES ($1, $2) \
             RETURNING id, name, email, active, created_at",
        )
        .bind(params.name)
        .bind(params.email)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn set_subscriber_active(
        &self,
        id: i32,
        active: bool,
    ) -> Result<SubscriberRecord, RepoError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "UPDATE subscribers SET active = $2 WHERE id = $1 \
             RETURNING id, name, email, active, created_at",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(SubscriberRecord::from).ok_or(RepoError::NotFound)
    }

    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, name, email, active, created_at FROM subscribers ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SubscriberRecord::from).collect())
    }
}
