//! Worker and sweeper configuration.

use std::time::Duration;

/// Stage worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Redis URL for queues and the status channel
    pub redis_url: String,
    /// Postgres URL for the job store
    pub database_url: String,
    /// Root directory for job artifacts
    pub storage_root: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            database_url: "postgres://localhost/reelcut".to_string(),
            storage_root: "storage".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            storage_root: std::env::var("STORAGE_ROOT").unwrap_or(defaults.storage_root),
        }
    }
}

/// Cleanup sweeper configuration.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Postgres URL for the job store
    pub database_url: String,
    /// Root directory for job artifacts
    pub storage_root: String,
    /// How often a sweep runs
    pub interval: Duration,
    /// How long completed jobs keep their artifacts
    pub retention: chrono::Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/reelcut".to_string(),
            storage_root: "storage".to_string(),
            interval: Duration::from_secs(60),
            retention: chrono::Duration::hours(24),
        }
    }
}

impl SweeperConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            storage_root: std::env::var("STORAGE_ROOT").unwrap_or(defaults.storage_root),
            interval: Duration::from_secs(
                std::env::var("CLEANUP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            retention: chrono::Duration::hours(
                std::env::var("RETENTION_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24),
            ),
        }
    }
}
