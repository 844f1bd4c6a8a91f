//! Postgres-backed repository implementations.

mod authors;
mod categories;
mod inbox;
mod posts;
mod subscribers;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    query,
};
use tracing::info;

use crate::application::repos::{HealthRepo, RepoError};
use crate::config::DatabaseSettings;
use crate::infra::error::InfraError;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, settings: &DatabaseSettings) -> Result<PgPool, InfraError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.get())
            .acquire_timeout(settings.acquire_timeout)
            .connect(url)
            .await
            .map_err(|err| InfraError::database(err.to_string()))?;

        info!(
            target = "kabar::infra::db",
            max_connections = settings.max_connections.get(),
            "database pool ready"
        );
        Ok(pool)
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!(target = "kabar::infra::db", "migrations applied");
        Ok(())
    }
}

#[async_trait]
impl HealthRepo for PostgresRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        query("SELECT 1")
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}
