//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and passed around as
//! an immutable value; nothing re-reads the environment afterwards.
//!
//! ## Variables
//!
//! - `STORAGE_BACKEND` - `log` (durable, default) or `memory`
//! - `STORAGE_PATH` - directory for the mapping log (default: `./data`)
//! - `LISTEN` - bind address (default: `0.0.0.0:8080`)
//! - `READ_TIMEOUT_SECS` - request body read timeout (default: 15)
//! - `WRITE_TIMEOUT_SECS` - request handling deadline (default: 15)
//! - `IDLE_TIMEOUT_SECS` - keep-alive idle connection timeout (default: 60)
//! - `SHUTDOWN_GRACE_SECS` - drain window before connections are forced
//!   closed (default: 5)
//! - `RUST_LOG` - log level filter (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: String,
    pub storage_path: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Timeout for reading a request body, in seconds.
    pub read_timeout: u64,
    /// Deadline for handling a request and writing the response, in seconds.
    pub write_timeout: u64,
    /// How long an idle keep-alive connection may wait for its next
    /// request before being closed, in seconds.
    pub idle_timeout: u64,
    /// Maximum time in-flight requests get to finish during shutdown,
    /// in seconds.
    pub shutdown_grace: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let storage_backend =
            env::var("STORAGE_BACKEND").unwrap_or_else(|_| "log".to_string());
        let storage_path = env::var("STORAGE_PATH").unwrap_or_else(|_| "./data".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let read_timeout = parse_secs("READ_TIMEOUT_SECS", 15);
        let write_timeout = parse_secs("WRITE_TIMEOUT_SECS", 15);
        let idle_timeout = parse_secs("IDLE_TIMEOUT_SECS", 60);
        let shutdown_grace = parse_secs("SHUTDOWN_GRACE_SECS", 5);

        Self {
            storage_backend,
            storage_path,
            listen_addr,
            log_level,
            log_format,
            read_timeout,
            write_timeout,
            idle_timeout,
            shutdown_grace,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `storage_backend` is not `log` or `memory`
    /// - `storage_path` is empty while the log backend is selected
    /// - `listen_addr` is not in `host:port` form
    /// - `log_format` is not `text` or `json`
    /// - any timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage_backend != "log" && self.storage_backend != "memory" {
            anyhow::bail!(
                "STORAGE_BACKEND must be 'log' or 'memory', got '{}'",
                self.storage_backend
            );
        }

        if self.storage_backend == "log" && self.storage_path.is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        for (name, value) in [
            ("READ_TIMEOUT_SECS", self.read_timeout),
            ("WRITE_TIMEOUT_SECS", self.write_timeout),
            ("IDLE_TIMEOUT_SECS", self.idle_timeout),
            ("SHUTDOWN_GRACE_SECS", self.shutdown_grace),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be greater than 0", name);
            }
        }

        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage backend: {}", self.storage_backend);
        if self.storage_backend == "log" {
            tracing::info!("  Storage path: {}", self.storage_path);
        }
        tracing::info!(
            "  Timeouts: read {}s, write {}s, idle {}s",
            self.read_timeout,
            self.write_timeout,
            self.idle_timeout
        );
        tracing::info!("  Shutdown grace: {}s", self.shutdown_grace);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_secs(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// Expects environment variables to be already loaded (e.g., via
/// `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
