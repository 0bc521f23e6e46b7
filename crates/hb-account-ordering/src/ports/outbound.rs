//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Account Ordering service.

use crate::domain::errors::{KVStoreError, SyncError};
use shared_types::{AccountId, FamilyId, Timestamp};
use std::fmt;
use std::sync::Arc;

/// Result type for prefix scans.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (hb-runtime) or `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All pairs whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Lets the runtime pick a backend at startup.
impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        (**self).delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        (**self).atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        (**self).exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        (**self).prefix_scan(prefix)
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// What a sync job should refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTarget {
    Account {
        family_id: FamilyId,
        account_id: AccountId,
    },
    Family(FamilyId),
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncTarget::Account { account_id, .. } => write!(f, "account:{account_id}"),
            SyncTarget::Family(family_id) => write!(f, "family:{family_id}"),
        }
    }
}

/// Background sync collaborator. The sync job itself lives outside this
/// crate; the service only asks and hands off.
pub trait SyncScheduler: Send + Sync {
    /// Is a sync for `target` already running or queued?
    fn is_syncing(&self, target: &SyncTarget) -> bool;

    /// Queue a sync for `target` unless one is already in flight. Must not
    /// block.
    ///
    /// The check and the insert happen as one step, so exactly one of any
    /// number of concurrent callers gets `Ok(true)`.
    fn sync_later(&self, target: SyncTarget) -> Result<bool, SyncError>;
}

impl<T: SyncScheduler + ?Sized> SyncScheduler for Arc<T> {
    fn is_syncing(&self, target: &SyncTarget) -> bool {
        (**self).is_syncing(target)
    }

    fn sync_later(&self, target: SyncTarget) -> Result<bool, SyncError> {
        (**self).sync_later(target)
    }
}
