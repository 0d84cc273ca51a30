use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 127.0.0.1)
    pub host: String,
    /// Server port (default: 8080)
    pub port: u16,
    pub gemini: GeminiConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Generation service base URL (default: the public Gemini endpoint)
    pub base_url: String,
    /// API key. May be empty; every generation then fails and the
    /// routine workflow serves its fallback plan.
    pub api_key: String,
    /// Model name (default: gemini-2.5-flash)
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database URL (default: sqlite:./data/wellspace.db)
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or "*" (default: *)
    pub origins: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            gemini: GeminiConfig {
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
                api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:./data/wellspace.db".to_string()),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            cors: CorsConfig {
                origins: env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
