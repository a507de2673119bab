//! Application state.

use std::sync::Arc;

use reelcut_queue::{RateLimiter, StatusChannel, WorkQueue};
use reelcut_store::{JobStore, UserStore};

use crate::auth::JwtKeys;
use crate::config::ApiConfig;

/// Shared application state: every handle is constructed once at startup
/// and handed to handlers through the router.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: JobStore,
    pub users: UserStore,
    pub queue: Arc<WorkQueue>,
    pub status: Arc<StatusChannel>,
    pub job_limiter: Arc<RateLimiter>,
    pub login_limiter: Arc<RateLimiter>,
    pub jwt: JwtKeys,
}

impl AppState {
    /// Connect all handles.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let pool = reelcut_store::connect(&config.database_url).await?;
        reelcut_store::ensure_schema(&pool).await?;

        let queue = WorkQueue::new(&config.redis_url)?;
        let status = StatusChannel::new(&config.redis_url)?;
        let job_limiter = RateLimiter::job_submissions(&config.redis_url)?;
        let login_limiter = RateLimiter::login_attempts(&config.redis_url)?;
        let jwt = JwtKeys::new(&config.jwt_secret);

        Ok(Self {
            config,
            store: JobStore::new(pool.clone()),
            users: UserStore::new(pool),
            queue: Arc::new(queue),
            status: Arc::new(status),
            job_limiter: Arc::new(job_limiter),
            login_limiter: Arc::new(login_limiter),
            jwt,
        })
    }
}
