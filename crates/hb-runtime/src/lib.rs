//! # Hearthbook Runtime
//!
//! Wires the account ordering service to its storage backend and the HTTP
//! gateway.
//!
//! ## Modular Structure
//!
//! - `config/` - Environment and command-line configuration
//! - `logging/` - Subscriber setup
//! - `storage/` - Backend selection (memory, file, RocksDB)
//! - `worker/` - Background sync worker
//! - `app/` - `serve` and `migrate`

pub mod app;
pub mod config;
pub mod logging;
pub mod storage;
pub mod worker;

pub use app::{build_service, migrate, open, serve, OpenedStore, Service};
pub use config::{Overrides, RuntimeConfig, RuntimeConfigError, StorageBackend};
