use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{ContactMessagesRepo, CreateContactMessageParams, RepoError};
use crate::domain::entities::ContactMessageRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ContactMessageRow {
    id: i32,
    name: String,
    email: String,
    subject: String,
    message: String,
    read: bool,
    created_at: OffsetDateTime,
}

impl From<ContactMessageRow> for ContactMessageRecord {
    fn from(row: ContactMessageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ContactMessagesRepo for PostgresRepositories {
    async fn create_contact_message(
        &self,
        params: CreateContactMessageParams,
    ) -> Result<ContactMessageRecord, RepoError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(
            "INSERT INTO contact_messages (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, subject, message, read, created_at",
        )
        .bind(params.name)
        .bind(params.email)
        .bind(params.subject)
        .bind(params.message)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessageRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(
            "SELECT id, name, email, subject, message, read, created_at FROM contact_messages \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContactMessageRecord::from).collect())
    }

    async fn mark_contact_message_read(
        &self,
        id: i32,
    ) -> Result<ContactMessageRecord, RepoError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(
            "UPDATE contact_messages SET read = TRUE WHERE id = $1 \
             RETURNING id, name, email, subject, message, read, created_at",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(ContactMessageRecord::from).ok_or(RepoError::NotFound)
    }
}
