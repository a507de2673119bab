//! Identity-keyed rate-limit counters.

use redis::AsyncCommands;
use tracing::debug;

use crate::error::QueueResult;

/// Counter with a sliding expiry, keyed by identity.
///
/// The window starts at the first increment and is never extended or reset
/// early; the key simply expires. Counts are eventually consistent across
/// processes, which is acceptable: the limiter is a deterrent, not a hard
/// security boundary.
pub struct RateLimiter {
    client: redis::Client,
    prefix: &'static str,
    max: u32,
    window_secs: i64,
}

/// Job submissions allowed per user per window.
const MAX_JOBS_PER_WINDOW: u32 = 10;
const JOB_WINDOW_SECS: i64 = 60 * 60;

/// Consecutive login failures before an identity is blocked.
const MAX_LOGIN_FAILURES: u32 = 7;
const LOGIN_BLOCK_SECS: i64 = 30 * 60;

impl RateLimiter {
    /// Create a limiter with explicit bounds.
    pub fn new(
        redis_url: &str,
        prefix: &'static str,
        max: u32,
        window_secs: i64,
    ) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            client,
            prefix,
            max,
            window_secs,
        })
    }

    /// Limiter for job submissions: a pure rolling window per user.
    pub fn job_submissions(redis_url: &str) -> QueueResult<Self> {
        Self::new(redis_url, "job_limit", MAX_JOBS_PER_WINDOW, JOB_WINDOW_SECS)
    }

    /// Limiter for failed logins: counts consecutive failures per identity.
    pub fn login_attempts(redis_url: &str) -> QueueResult<Self> {
        Self::new(
            redis_url,
            "login_attempts",
            MAX_LOGIN_FAILURES,
            LOGIN_BLOCK_SECS,
        )
    }

    fn key(&self, identity: &str) -> String {
        format!("{}:{}", self.prefix, identity)
    }

    /// Record one qualifying action and report whether the identity is
    /// still inside its allowance. The expiry is set only on the first
    /// increment of a window.
    pub async fn hit(&self, identity: &str) -> QueueResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.key(identity);

        let count: u32 = conn.incr(&key, 1).await?;
        if count == 1 {
            conn.expire::<_, ()>(&key, self.window_secs).await?;
        }

        let allowed = count <= self.max;
        if !allowed {
            debug!(key = %key, count, max = self.max, "Rate limit exceeded");
        }
        Ok(allowed)
    }

    /// Check whether an identity has exhausted its allowance, without
    /// recording anything.
    pub async fn blocked(&self, identity: &str) -> QueueResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let count: Option<u32> = conn.get(self.key(identity)).await?;
        Ok(count.is_some_and(|c| c >= self.max))
    }

    /// Reset an identity's counter to zero immediately.
    pub async fn reset(&self, identity: &str) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(self.key(identity)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed_per_limiter() {
        let limiter = RateLimiter::job_submissions("redis://localhost:6379").unwrap();
        assert_eq!(limiter.key("user-1"), "job_limit:user-1");

        let limiter = RateLimiter::login_attempts("redis://localhost:6379").unwrap();
        assert_eq!(limiter.key("a@b.c"), "login_attempts:a@b.c");
    }
}
