//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_APP_NAME, DEFAULT_APP_VERSION, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_UPLOAD_DIR, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    jwt_secret_defaulted: bool,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Key rate limits on `X-Forwarded-For`/`X-Real-IP` (only behind a proxy)
    pub trust_proxy_headers: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("debug", &self.debug)
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}

impl Config {
    /// Create a configuration with defaults and the given JWT secret.
    ///
    /// # Errors
    /// Returns a validation error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH`.
    pub fn new(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            debug: false,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret,
            jwt_secret_defaulted: false,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            trust_proxy_headers: false,
        })
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let (jwt_secret, defaulted) =
            resolve_jwt_secret(env::var("JWT_SECRET").ok(), cfg!(debug_assertions))?;

        let mut config = Self::new(jwt_secret)?;
        config.jwt_secret_defaulted = defaulted;

        if let Ok(name) = env::var("APP_NAME") {
            config.app_name = name;
        }
        if let Ok(version) = env::var("APP_VERSION") {
            config.app_version = version;
        }
        config.debug = env::var("DEBUG")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(url) = env::var("REDIS_URL") {
            config.redis_url = url;
        }
        if let Some(hours) = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.jwt_expiration_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(max) = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_upload_bytes = max;
        }
        config.trust_proxy_headers = env::var("TRUST_PROXY_HEADERS")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Whether JWT_SECRET was missing and the development default is in use.
    ///
    /// Configuration loads before logging is set up, so the caller reports it.
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret_defaulted
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Development builds fall back to a fixed secret; release builds refuse to
/// start without one.
fn resolve_jwt_secret(value: Option<String>, allow_default: bool) -> AppResult<(String, bool)> {
    match value {
        Some(secret) => Ok((secret, false)),
        None if allow_default => Ok((DEV_JWT_SECRET.to_string(), true)),
        None => Err(AppError::validation(
            "JWT_SECRET environment variable must be set in production",
        )),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new(SECRET).unwrap();
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
        assert_eq!(config.app_version, "1.0.0");
        assert!(!config.debug);
        assert!(!config.trust_proxy_headers);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("too-short");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = Config::new(SECRET).unwrap();
        let output = format!("{:?}", config);
        assert!(!output.contains(SECRET));
        assert!(!output.contains("postgres://"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_secret_reports_default() {
        let (secret, defaulted) = resolve_jwt_secret(None, true).unwrap();
        assert_eq!(secret, DEV_JWT_SECRET);
        assert!(defaulted);

        let (secret, defaulted) = resolve_jwt_secret(Some(SECRET.into()), true).unwrap();
        assert_eq!(secret, SECRET);
        assert!(!defaulted);

        assert!(!Config::new(SECRET).unwrap().uses_default_jwt_secret());
    }

    #[test]
    fn test_missing_secret_rejected_in_release() {
        let result = resolve_jwt_secret(None, false);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
