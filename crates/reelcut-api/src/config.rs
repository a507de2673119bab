//! API configuration.

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins, `*` for any
    pub cors_origins: Vec<String>,
    /// Max request body size in bytes
    pub max_body_size: usize,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Redis URL for queues, status channel and rate limiters
    pub redis_url: String,
    /// Postgres URL for the job and user stores
    pub database_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024,
            jwt_secret: "dev-secret-change-me".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            database_url: "postgres://localhost/reelcut".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
        }
    }
}
