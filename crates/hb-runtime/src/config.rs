//! # Runtime Configuration
//!
//! Environment first, command-line flags on top.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HB_DATA_DIR` | `./data` |
//! | `HB_STORAGE` | `file` (`memory`, `file`, `rocksdb`) |
//! | `HB_HTTP_ADDR` | `127.0.0.1` |
//! | `HB_HTTP_PORT` | `3000` |
//! | `HB_REQUEST_TIMEOUT_SECS` | `10` |
//! | `HB_REQUIRE_COMPLETE_REORDER` | `false` |
//! | `HB_LOG_LEVEL` or `RUST_LOG` | `info` |
//! | `HB_JSON_LOGS` | `false` |

use hb_account_ordering::{OrderingConfig, ReorderPolicy};
use hb_gateway::GatewayConfig;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Which key-value store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageBackend {
    /// Nothing survives a restart.
    Memory,
    /// Single snapshot file under the data directory.
    #[default]
    File,
    /// RocksDB under the data directory (`rocksdb` feature).
    Rocksdb,
}

impl FromStr for StorageBackend {
    type Err = RuntimeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "rocksdb" => Ok(StorageBackend::Rocksdb),
            _ => Err(RuntimeConfigError::Invalid {
                var: "HB_STORAGE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub gateway: GatewayConfig,
    pub ordering: OrderingConfig,
    /// Filter directive handed to `EnvFilter`.
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage: StorageBackend::default(),
            gateway: GatewayConfig::default(),
            ordering: OrderingConfig::default(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("HB_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(storage) = lookup("HB_STORAGE") {
            config.storage = storage.parse()?;
        }
        if let Some(addr) = lookup("HB_HTTP_ADDR") {
            config.gateway.host = parse_var("HB_HTTP_ADDR", &addr)?;
        }
        if let Some(port) = lookup("HB_HTTP_PORT") {
            config.gateway.port = parse_var("HB_HTTP_PORT", &port)?;
        }
        if let Some(secs) = lookup("HB_REQUEST_TIMEOUT_SECS") {
            config.gateway.request_timeout =
                Duration::from_secs(parse_var("HB_REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(flag) = lookup("HB_REQUIRE_COMPLETE_REORDER") {
            if parse_flag("HB_REQUIRE_COMPLETE_REORDER", &flag)? {
                config.ordering.reorder_policy = ReorderPolicy::RequireComplete;
            }
        }
        if let Some(level) = lookup("HB_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }
        if let Some(flag) = lookup("HB_JSON_LOGS") {
            config.json_logs = parse_flag("HB_JSON_LOGS", &flag)?;
        }

        config.gateway.max_reorder_batch = config.ordering.max_reorder_batch;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(storage) = overrides.storage {
            self.storage = storage;
        }
        if let Some(host) = overrides.host {
            self.gateway.host = host;
        }
        if let Some(port) = overrides.port {
            self.gateway.port = port;
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if overrides.json_logs {
            self.json_logs = true;
        }
    }

    /// File holding the snapshot for the `file` backend.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("accounts.db")
    }

    pub fn rocksdb_path(&self) -> PathBuf {
        self.data_dir.join("rocksdb")
    }
}

/// Command-line values that replace their environment counterparts.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum, global = true)]
    pub storage: Option<StorageBackend>,

    /// HTTP bind address
    #[arg(long, global = true)]
    pub host: Option<IpAddr>,

    /// HTTP port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Log filter, e.g. `info` or `hb_account_ordering=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    pub json_logs: bool,
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, RuntimeConfigError> {
    value.trim().parse().map_err(|_| RuntimeConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, RuntimeConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(RuntimeConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}
