//! Stage workers for the reelcut pipeline.
//!
//! This crate provides:
//! - The stage-agnostic blocking worker loop
//! - Per-stage processing (download, transcribe, render)
//! - The Gemini highlight detector client
//! - The retention-based cleanup sweeper

pub mod config;
pub mod context;
pub mod error;
pub mod gemini;
pub mod runner;
pub mod stages;
pub mod sweeper;

pub use config::{SweeperConfig, WorkerConfig};
pub use context::WorkerContext;
pub use error::{WorkerError, WorkerResult};
pub use gemini::GeminiClient;
pub use runner::run_worker;
pub use sweeper::Sweeper;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing for a worker binary: JSON when `LOG_FORMAT=json`,
/// ANSI pretty output otherwise.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reelcut=debug"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
