//! Service configuration.

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/paymoment").
    pub data_dir: String,

    /// Shared secret for bearer-JWT validation (HS256).
    ///
    /// Tokens are issued by the identity service with the same secret.
    /// The default is for local development only.
    pub auth_secret: String,

    /// Expected JWT issuer (default: "paymoment-id").
    pub auth_issuer: String,

    /// Expected JWT audience (default: "paymoment").
    pub auth_audience: String,

    /// Payment provider API URL (default: `<https://api.paystack.co>`).
    pub provider_base_url: String,

    /// Payment provider secret key (optional; deposits are unavailable
    /// without it).
    pub provider_secret_key: Option<String>,

    /// Per-request timeout for provider calls, in seconds.
    pub provider_timeout_seconds: u64,

    /// Starting balance granted on registration, in minor units.
    pub signup_bonus: i64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/paymoment".into()),
            auth_secret: std::env::var("AUTH_SECRET").unwrap_or_else(|_| "dev-secret".into()),
            auth_issuer: std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "paymoment-id".into()),
            auth_audience: std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "paymoment".into()),
            provider_base_url: std::env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://api.paystack.co".into()),
            provider_secret_key: std::env::var("PROVIDER_SECRET_KEY").ok(),
            provider_timeout_seconds: std::env::var("PROVIDER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            signup_bonus: std::env::var("SIGNUP_BONUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/paymoment".into(),
            auth_secret: "dev-secret".into(),
            auth_issuer: "paymoment-id".into(),
            auth_audience: "paymoment".into(),
            provider_base_url: "https://api.paystack.co".into(),
            provider_secret_key: None,
            provider_timeout_seconds: 15,
            signup_bonus: 0,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
