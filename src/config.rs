//! Configuration module
//!
//! Loads `AppConfig` from a TOML file (default
//! `~/.config/aquashine/config.toml`, override with `AQUASHINE_CONFIG`).
//! Every section has serde defaults so a partial file is fine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aquashine")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub object_store: ObjectStoreConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub cleanup: CleanupConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight work during graceful shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path, ignored when `url` is set
    pub path: String,
    /// Full connection URL override (e.g. a PostgreSQL URL)
    pub url: Option<String>,
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./aquashine.db".to_string(),
            url: None,
        }
    }
}

/// Admin authentication settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared admin password, bcrypt-hashed once at startup
    pub admin_password: String,
    pub jwt_secret: String,
    /// Session token lifetime in minutes
    pub jwt_expiration_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            admin_password: "change-me".to_string(),
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_minutes: 240,
        }
    }
}

/// Uploaded image storage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObjectStoreConfig {
    /// Directory holding the uploaded files
    pub root_dir: String,
    /// URL prefix under which the root directory is served
    pub public_base_url: String,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            root_dir: "./uploads".to_string(),
            public_base_url: "/uploads".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing-subscriber EnvFilter directive, e.g. `info` or `debug,sqlx=warn`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Per-IP rate limits for the public endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub login_per_minute: u32,
    pub form_submissions_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_per_minute: 10,
            form_submissions_per_minute: 30,
        }
    }
}

/// Orphaned-upload cleanup worker settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub interval_secs: u64,
    /// Delete attempts per orphaned object before giving up
    pub max_attempts: u32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            max_attempts: 5,
        }
    }
}

/// Errors from loading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(toml::de::Error),
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.database.connection_url(), "sqlite://./aquashine.db?mode=rwc");
        assert_eq!(cfg.security.jwt_expiration_minutes, 240);
        assert_eq!(cfg.cleanup.max_attempts, 5);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999

            [security]
            admin_password = "wash-n-wax"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.admin_password, "wash-n-wax");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn explicit_database_url_wins() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            path = "./ignored.db"
            url = "postgres://app@localhost/aquashine"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.connection_url(), "postgres://app@localhost/aquashine");
    }
}
