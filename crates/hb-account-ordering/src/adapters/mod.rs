//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports plus the data directory
//! lock used by file-backed deployments.

pub mod lock;
pub mod serializer;
pub mod storage;
pub mod sync;
pub mod time;

pub use lock::{DatabaseLock, LockError};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
pub use sync::{ChannelSyncScheduler, SyncReceiver};
pub use time::{ManualTimeSource, SystemTimeSource};
