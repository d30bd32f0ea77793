use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a named error if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 14).
    pub refresh_token_expiry_days: i64,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 14;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            access_token_expiry_mins: std::env::var("JWT_ACCESS_EXPIRY_MINS")
                .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
                .parse::<i64>()
                .context("JWT_ACCESS_EXPIRY_MINS must be a valid integer")?,
            refresh_token_expiry_days: std::env::var("JWT_REFRESH_EXPIRY_DAYS")
                .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
                .parse::<i64>()
                .context("JWT_REFRESH_EXPIRY_DAYS must be a valid integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
