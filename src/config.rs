//! Configuration module for environment variables and application settings

use std::env;

use once_cell::sync::Lazy;

/// Global application configuration loaded from environment variables
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; when unset the server falls back to the
    /// in-memory store
    pub database_url: Option<String>,

    /// Server configuration
    pub server: ServerConfig,

    /// Session cookie configuration
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by the CORS layer (frontend)
    pub cors_origin: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime of the `sessionId` cookie, in days
    pub cookie_max_age_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Every knob has a default so the server can boot in a bare environment.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok(),

            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                // $PORT wins when set (Heroku-style), otherwise SERVER_PORT
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                cors_origin: env::var("CORS_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            },

            session: SessionConfig {
                cookie_max_age_days: env::var("SESSION_COOKIE_MAX_AGE_DAYS")
                    .ok()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(14),
            },
        }
    }
}
