//! Postgres persistence for jobs and users.
//!
//! This crate provides:
//! - Connection pool setup and idempotent schema bootstrap
//! - `JobStore`: the durable job record and its single mutation path
//! - `UserStore`: registration and login lookups

pub mod error;
pub mod jobs;
pub mod users;

pub use error::{StoreError, StoreResult};
pub use jobs::{ArtifactUpdate, JobStore};
pub use users::{User, UserStore};

use sqlx::postgres::{PgPool, PgPoolOptions};

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Open a connection pool against `database_url`.
pub async fn connect(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the bootstrap schema. Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::debug!("Schema bootstrap complete");
    Ok(())
}
