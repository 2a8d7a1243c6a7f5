use crate::auth::jwt::JwtConfig;

/// Server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl ServerConfig {
    /// Read `HOST`, `PORT`, `CORS_ORIGINS` (comma-separated) and
    /// `REQUEST_TIMEOUT_SECS`, falling back to local-development defaults.
    /// Token settings come from [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on an unparsable port or timeout, or a missing token secret.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.into());

        let port = std::env::var("PORT")
            .map(|p| p.parse().expect("PORT must be a valid u16"))
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .map(|t| t.parse().expect("REQUEST_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}
