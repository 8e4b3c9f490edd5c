//! Back-office server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Back-office server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (`sqlite:path` or `sqlite::memory:`)
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for workspace JWTs
    pub jwt_secret: String,
    /// Log level filter when RUST_LOG is unset
    pub log_level: Option<String>,
    /// Directory for daily rolling log files (only used if it exists)
    pub log_dir: Option<String>,
    /// Pool size
    pub db_max_connections: u32,
    /// SQLite busy_timeout in milliseconds
    pub db_busy_timeout_ms: u64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:backoffice.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            log_level: std::env::var("LOG_LEVEL").ok().filter(|s| !s.is_empty()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            db_busy_timeout_ms: std::env::var("DB_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }

    /// In-memory configuration for tests
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: jwt_secret.to_string(),
            log_level: None,
            log_dir: None,
            db_max_connections: 1,
            db_busy_timeout_ms: 5000,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
