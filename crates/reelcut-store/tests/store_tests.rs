//! Job store integration tests.
//!
//! Run against a live Postgres with `DATABASE_URL` set:
//! `cargo test -p reelcut-store -- --ignored`

use chrono::Duration;
use uuid::Uuid;

use reelcut_models::JobStatus;
use reelcut_store::{ArtifactUpdate, JobStore, UserStore};

async fn stores() -> (JobStore, UserStore) {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let pool = reelcut_store::connect(&url).await.expect("connect failed");
    reelcut_store::ensure_schema(&pool).await.expect("schema failed");
    (JobStore::new(pool.clone()), UserStore::new(pool))
}

async fn test_user(users: &UserStore) -> String {
    let email = format!("{}@test.local", Uuid::new_v4());
    users
        .create("Test User", &email, "hash")
        .await
        .expect("user create failed")
        .id
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn create_starts_queued_and_lists_newest_first() {
    let (jobs, users) = stores().await;
    let owner = test_user(&users).await;

    let first = jobs
        .create(&owner, "https://example.com/a", 3)
        .await
        .unwrap();
    assert_eq!(first.status, JobStatus::Queued);
    assert!(first.completed_at.is_none());
    assert!(!first.has_artifacts());

    let second = jobs
        .create(&owner, "https://example.com/b", 5)
        .await
        .unwrap();

    let listed = jobs.list_by_owner(&owner).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn get_is_owner_scoped() {
    let (jobs, users) = stores().await;
    let owner = test_user(&users).await;
    let other = test_user(&users).await;

    let job = jobs
        .create(&owner, "https://example.com/v", 3)
        .await
        .unwrap();

    assert!(jobs.get(&job.id, &owner).await.unwrap().is_some());
    assert!(jobs.get(&job.id, &other).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn advance_merges_artifacts_and_sets_completed_at_once() {
    let (jobs, users) = stores().await;
    let owner = test_user(&users).await;
    let job = jobs
        .create(&owner, "https://example.com/v", 3)
        .await
        .unwrap();

    let updated = jobs
        .advance(
            &job.id,
            JobStatus::Downloading,
            ArtifactUpdate {
                video_path: Some("storage/videos/x.mp4".into()),
                audio_path: Some("storage/audio/x.mp3".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, JobStatus::Downloading);
    assert_eq!(updated.video_path.as_deref(), Some("storage/videos/x.mp4"));
    assert!(updated.completed_at.is_none());

    // A later advance without artifacts must not clear earlier ones.
    let updated = jobs
        .advance(&job.id, JobStatus::Transcribing, ArtifactUpdate::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.video_path.as_deref(), Some("storage/videos/x.mp4"));
    assert_eq!(updated.audio_path.as_deref(), Some("storage/audio/x.mp3"));

    jobs.advance(&job.id, JobStatus::Rendering, ArtifactUpdate::default())
        .await
        .unwrap();
    let completed = jobs
        .advance(
            &job.id,
            JobStatus::Completed,
            ArtifactUpdate {
                clips_path: Some(vec!["storage/clips/x/clip_1.mp4".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    let first_completion = completed.completed_at.expect("completed_at set");
    assert_eq!(completed.clips(), ["storage/clips/x/clip_1.mp4"]);

    // Advancing an already-completed row keeps the original timestamp.
    let again = jobs
        .advance(&job.id, JobStatus::Completed, ArtifactUpdate::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.completed_at, Some(first_completion));
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn advance_unknown_id_is_none() {
    let (jobs, _) = stores().await;
    let missing = reelcut_models::JobId::new();
    let result = jobs
        .advance(&missing, JobStatus::Failed, ArtifactUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn expired_completed_respects_status_age_and_artifacts() {
    let (jobs, users) = stores().await;
    let owner = test_user(&users).await;

    // Completed long ago, artifacts present: eligible.
    let old = jobs
        .create(&owner, "https://example.com/old", 3)
        .await
        .unwrap();
    jobs.advance(
        &old.id,
        JobStatus::Completed,
        ArtifactUpdate {
            highlights_path: Some("storage/highlights/old.json".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Fresh completion: not eligible yet.
    let young = jobs
        .create(&owner, "https://example.com/young", 3)
        .await
        .unwrap();
    jobs.advance(
        &young.id,
        JobStatus::Completed,
        ArtifactUpdate {
            highlights_path: Some("storage/highlights/young.json".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Failed job with artifacts: never eligible.
    let failed = jobs
        .create(&owner, "https://example.com/failed", 3)
        .await
        .unwrap();
    jobs.advance(
        &failed.id,
        JobStatus::Failed,
        ArtifactUpdate {
            video_path: Some("storage/videos/failed.mp4".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Retention zero makes every completed job with artifacts expired.
    let expired = jobs.expired_completed(Duration::zero()).await.unwrap();
    let ids: Vec<_> = expired.iter().map(|j| j.id.clone()).collect();
    assert!(ids.contains(&old.id));
    assert!(ids.contains(&young.id));
    assert!(!ids.contains(&failed.id));

    // A day of retention shields both completions.
    let expired = jobs.expired_completed(Duration::hours(24)).await.unwrap();
    let ids: Vec<_> = expired.iter().map(|j| j.id.clone()).collect();
    assert!(!ids.contains(&old.id));
    assert!(!ids.contains(&young.id));
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn clear_artifacts_keeps_identity_and_timestamps() {
    let (jobs, users) = stores().await;
    let owner = test_user(&users).await;
    let job = jobs
        .create(&owner, "https://example.com/v", 3)
        .await
        .unwrap();
    jobs.advance(
        &job.id,
        JobStatus::Completed,
        ArtifactUpdate {
            video_path: Some("v.mp4".into()),
            audio_path: Some("a.mp3".into()),
            transcript_path: Some("t.json".into()),
            highlights_path: Some("h.json".into()),
            clips_path: Some(vec!["c1.mp4".into()]),
        },
    )
    .await
    .unwrap();

    jobs.clear_artifacts(&job.id).await.unwrap();

    let cleared = jobs.get(&job.id, &owner).await.unwrap().unwrap();
    assert!(!cleared.has_artifacts());
    assert_eq!(cleared.status, JobStatus::Completed);
    assert!(cleared.completed_at.is_some());
    assert_eq!(cleared.user_id, owner);

    // Clearing again is harmless.
    jobs.clear_artifacts(&job.id).await.unwrap();
}
