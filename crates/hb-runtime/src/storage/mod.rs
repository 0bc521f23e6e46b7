//! Storage backend selection.

#[cfg(feature = "rocksdb")]
mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

use crate::config::{RuntimeConfig, StorageBackend};
use anyhow::Context;
use hb_account_ordering::{FileBackedKVStore, InMemoryKVStore, KeyValueStore};

/// Open the configured backend.
///
/// The caller holds the data directory lock for as long as the store lives.
pub fn open_store(config: &RuntimeConfig) -> anyhow::Result<Box<dyn KeyValueStore>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("[runtime] In-memory storage: nothing survives a restart");
            Ok(Box::new(InMemoryKVStore::new()))
        }
        StorageBackend::File => {
            let path = config.snapshot_path();
            let store = FileBackedKVStore::open(&path)
                .with_context(|| format!("Failed to open store at {}", path.display()))?;
            tracing::info!(path = %path.display(), "[runtime] Opened file store");
            Ok(Box::new(store))
        }
        StorageBackend::Rocksdb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &RuntimeConfig) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let path = config.rocksdb_path();
    let store = RocksDbStore::open(RocksDbConfig::new(&path))
        .with_context(|| format!("Failed to open RocksDB at {}", path.display()))?;
    tracing::info!(path = %path.display(), "[runtime] Opened RocksDB store");
    Ok(Box::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &RuntimeConfig) -> anyhow::Result<Box<dyn KeyValueStore>> {
    anyhow::bail!("RocksDB storage requested but hb-runtime was built without the `rocksdb` feature")
}
