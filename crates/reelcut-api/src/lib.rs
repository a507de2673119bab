//! Axum HTTP API server.
//!
//! This crate provides:
//! - Job submission, listing and detail endpoints
//! - A server-sent-events stream of live job status
//! - Registration and login with JWT auth and login throttling
//! - The administrative status override

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
