//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `PA_DONDE_`, nested keys split on `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/pa-donde/config.toml
//! 4. System directory: /etc/pa-donde/config.toml
//! 5. Default values
//!
//! For example `PA_DONDE_SERVICE__PORT=8081` overrides `service.port` and
//! `PA_DONDE_PAGINATION__MAX_PAGE_SIZE=25` overrides `pagination.max_page_size`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::pagination::PaginationConfig;

const APP_NAME: &str = "pa-donde";
const ENV_PREFIX: &str = "PA_DONDE_";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Place store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Page defaults and bounds for list endpoints
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl ServiceConfig {
    /// Address the listener binds, as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which store backs the place endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    /// SQLite file or in-memory database through sqlx
    Sqlite,
    /// Process-local map; contents are lost on restart
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store engine
    #[serde(default = "default_engine")]
    pub engine: DatabaseEngine,

    /// Connection URL (sqlite engine only)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Pool acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Connection attempts after the first one fails
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between attempts; doubled after each failure
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// Enable compression
    #[serde(default = "default_true")]
    pub compression: bool,

    /// CORS configuration (permissive, restrictive)
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            compression: true,
            cors_mode: default_cors_mode(),
        }
    }
}

impl MiddlewareConfig {
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_engine() -> DatabaseEngine {
    DatabaseEngine::Sqlite
}

fn default_database_url() -> String {
    "sqlite://pa-donde.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Every config file that exists is merged, system-wide first, so the
    /// working directory file wins over the XDG one, which wins over `/etc`.
    /// Environment variables override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so later merges override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the search path; defaults and environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }

    /// Config file locations in priority order (highest first)
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_NAME).join("config.toml"));
        paths
    }

    /// Reject configurations the service cannot run with
    ///
    /// Runs once at startup; the pagination checks guarantee every resolved
    /// page window has a page and page size of at least 1.
    pub fn validate(&self) -> Result<()> {
        self.pagination.validate()?;

        if self.service.name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "service.name must not be empty".to_string(),
            ));
        }
        if self.middleware.body_limit_mb == 0 {
            return Err(Error::InvalidConfig(
                "middleware.body_limit_mb must be at least 1".to_string(),
            ));
        }
        if !matches!(self.middleware.cors_mode.as_str(), "permissive" | "restrictive") {
            return Err(Error::InvalidConfig(format!(
                "middleware.cors_mode must be \"permissive\" or \"restrictive\", got \"{}\"",
                self.middleware.cors_mode
            )));
        }
        if self.database.engine == DatabaseEngine::Sqlite && self.database.max_connections == 0 {
            return Err(Error::InvalidConfig(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: APP_NAME.to_string(),
                host: default_host(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            database: DatabaseConfig::default(),
            pagination: PaginationConfig::default(),
            middleware: MiddlewareConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 3000);
        assert_eq!(config.service.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.database.engine, DatabaseEngine::Sqlite);
        assert_eq!(config.pagination, PaginationConfig::new(1, 10, 50));
        assert_eq!(config.middleware.body_limit_bytes(), 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "pa-donde.toml",
                r#"
                [service]
                name = "places"
                port = 8081

                [database]
                engine = "memory"

                [pagination]
                default_page_size = 20
                "#,
            )?;
            jail.set_env("PA_DONDE_PAGINATION__MAX_PAGE_SIZE", "25");

            let config = Config::load_from("pa-donde.toml").expect("config loads");
            assert_eq!(config.service.name, "places");
            assert_eq!(config.service.port, 8081);
            assert_eq!(config.service.log_level, "info");
            assert_eq!(config.database.engine, DatabaseEngine::Memory);
            assert_eq!(config.pagination, PaginationConfig::new(1, 20, 25));
            Ok(())
        });
    }

    #[test]
    fn test_load_merges_working_directory_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[service]\nname = \"cwd\"\nport = 9000\n")?;
            jail.set_env("PA_DONDE_SERVICE__PORT", "9100");

            let config = Config::load().expect("config loads");
            assert_eq!(config.service.name, "cwd");
            assert_eq!(config.service.port, 9100);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.service.port, 3000);
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[database]\nengine = \"postgres\"\n")?;
            let result = Config::load_from("bad.toml");
            assert!(matches!(result, Err(Error::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_default_size_above_max() {
        let mut config = Config::default();
        config.pagination = PaginationConfig::new(1, 60, 50);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_pagination_values() {
        for pagination in [
            PaginationConfig::new(0, 10, 50),
            PaginationConfig::new(1, 0, 50),
            PaginationConfig::new(1, 10, 0),
        ] {
            let mut config = Config::default();
            config.pagination = pagination;
            assert!(config.validate().is_err(), "{pagination:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_unknown_cors_mode() {
        let mut config = Config::default();
        config.middleware.cors_mode = "open".to_string();
        assert!(config.validate().is_err());
    }
}
