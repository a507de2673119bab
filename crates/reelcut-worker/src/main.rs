//! Stage worker binary.
//!
//! Runs one worker instance for one stage role:
//! `reelcut-worker <download|transcribe|render>`.
//! Scale a stage horizontally by running more instances of its role.

use tracing::{error, info};

use reelcut_queue::Stage;
use reelcut_worker::{init_tracing, run_worker, WorkerConfig, WorkerContext};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let role = std::env::args().nth(1);
    let stage = match role.as_deref().map(|r| r.parse::<Stage>()) {
        Some(Ok(stage)) => stage,
        _ => {
            eprintln!("Provide worker role: download | transcribe | render");
            std::process::exit(1);
        }
    };

    let config = WorkerConfig::from_env();
    info!(stage = %stage, "Starting reelcut-worker");

    // Fail fast if the stage's external tools are absent.
    let tool_check = match stage {
        Stage::Download => reelcut_media::ensure_tool("yt-dlp")
            .and_then(|_| reelcut_media::ensure_tool("ffmpeg")),
        Stage::Render => reelcut_media::ensure_tool("ffmpeg"),
        Stage::Transcribe => Ok(std::path::PathBuf::new()),
    };
    if let Err(e) = tool_check {
        error!(error = %e, "Required tool missing");
        std::process::exit(1);
    }

    let ctx = match WorkerContext::new(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "Failed to initialize worker context");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_worker(&ctx, stage).await {
        error!(error = %e, "Worker loop terminated");
        std::process::exit(1);
    }
}
