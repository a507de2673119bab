//! Redis integration tests for queues, status channel and rate limiters.
//!
//! Run against a live Redis with `REDIS_URL` set:
//! `cargo test -p reelcut-queue -- --ignored`

use futures_util::StreamExt;

use reelcut_models::{JobId, JobStatus, StatusEvent};
use reelcut_queue::{RateLimiter, Stage, StatusChannel, WorkQueue};

fn redis_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn queue_delivers_in_fifo_order() {
    let queue = WorkQueue::new(&redis_url()).expect("queue client");

    let first = JobId::new();
    let second = JobId::new();
    queue.push(Stage::Transcribe, &first).await.unwrap();
    queue.push(Stage::Transcribe, &second).await.unwrap();

    assert_eq!(queue.pop_blocking(Stage::Transcribe).await.unwrap(), first);
    assert_eq!(queue.pop_blocking(Stage::Transcribe).await.unwrap(), second);
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn status_channel_delivers_in_publish_order() {
    let channel = StatusChannel::new(&redis_url()).expect("status client");
    let job_id = JobId::new();

    let mut stream = channel.subscribe(&job_id).await.unwrap();
    // Give the subscription a moment to register before publishing.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    channel
        .transition(&job_id, JobStatus::Downloading)
        .await
        .unwrap();
    channel
        .completed(&job_id, vec!["clip_1.mp4".into()])
        .await
        .unwrap();

    let first = stream.next().await.unwrap();
    assert_eq!(first, StatusEvent::status(JobStatus::Downloading));

    let second = stream.next().await.unwrap();
    assert_eq!(second.status, JobStatus::Completed);
    assert_eq!(second.clips.as_deref(), Some(&["clip_1.mp4".to_string()][..]));
    assert!(second.is_terminal());
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn late_subscribers_see_no_replay() {
    let channel = StatusChannel::new(&redis_url()).expect("status client");
    let job_id = JobId::new();

    channel
        .transition(&job_id, JobStatus::Downloading)
        .await
        .unwrap();

    let mut stream = channel.subscribe(&job_id).await.unwrap();
    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(300),
        stream.next(),
    )
    .await
    .is_err();
    assert!(timed_out, "subscriber must not see events published before it");
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn submission_limiter_rejects_after_allowance() {
    let limiter =
        RateLimiter::new(&redis_url(), "test_job_limit", 3, 60).expect("limiter client");
    let user = format!("user-{}", uuid());

    for _ in 0..3 {
        assert!(limiter.hit(&user).await.unwrap());
    }
    assert!(!limiter.hit(&user).await.unwrap());
    assert!(limiter.blocked(&user).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn login_limiter_blocks_until_reset() {
    let limiter =
        RateLimiter::new(&redis_url(), "test_login_limit", 2, 60).expect("limiter client");
    let identity = format!("id-{}", uuid());

    assert!(!limiter.blocked(&identity).await.unwrap());
    limiter.hit(&identity).await.unwrap();
    assert!(!limiter.blocked(&identity).await.unwrap());
    limiter.hit(&identity).await.unwrap();
    assert!(limiter.blocked(&identity).await.unwrap());

    // One success clears the counter immediately.
    limiter.reset(&identity).await.unwrap();
    assert!(!limiter.blocked(&identity).await.unwrap());
}

fn uuid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}-{}", std::process::id(), nanos)
}
