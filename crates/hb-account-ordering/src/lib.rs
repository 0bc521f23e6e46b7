//! # Account Ordering
//!
//! Display order for a family's financial accounts: default positions on
//! creation, the nils-last ordering query, atomic bulk reorder and the
//! one-time position backfill.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique positions | Within a family no two accounts share a non-null position (kept by assignment; a partial reorder may break it, see `ReorderPolicy`) |
//! | Total order | Listing sorts by position (nulls last), then `created_at`, then id |
//! | Family scope | Accounts are only reachable through their owning family |
//! | Atomic reorder | A reorder commits every update or none |
//! | Positions never cleared | Only reorder and backfill change a position, and never to null |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, ordering rules, validation, errors
//! - `ports/` - `AccountOrderingApi` (inbound), storage/clock/sync traits (outbound)
//! - `adapters/` - In-memory and file stores, bincode records, clocks, sync channel, process lock
//! - `service/` - Application service implementing the API
//! - `migration/` - Backfill of positions for pre-existing accounts
//! - `api/` - Wire payloads and the error-reporting boundary
//!
//! ## Usage
//!
//! ```ignore
//! use hb_account_ordering::*;
//!
//! let (scheduler, _jobs) = ChannelSyncScheduler::new();
//! let mut service = AccountOrderingService::new(
//!     AccountOrderingDependencies {
//!         kv_store: InMemoryKVStore::new(),
//!         time_source: SystemTimeSource,
//!         sync_scheduler: scheduler,
//!     },
//!     OrderingConfig::default(),
//! );
//!
//! let family = service.create_family("Dylan Family", "USD")?;
//! let checking = service.create_account(&family.id, NewAccount::new("Checking", AccountKind::Depository, "USD"))?;
//! service.reorder(&family.id, &AccountOrder::new(vec![checking.id]))?;
//! ```

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod migration;
pub mod ports;
pub mod service;

pub use adapters::{
    ChannelSyncScheduler, DatabaseLock, FileBackedKVStore, InMemoryKVStore, LockError,
    ManualTimeSource, SyncReceiver, SystemTimeSource,
};
pub use config::{OrderingConfig, ReorderPolicy};
pub use domain::{
    Account, AccountKind, AccountOrder, Classification, ErrorKind, Family, KVStoreError, NewAccount,
    OrderedAccounts, OrderingError, SyncDispatch,
};
pub use migration::{BackfillReport, MigrationOutcome, Migrator};
pub use ports::{
    AccountOrderingApi, BatchOperation, KeyValueStore, ScanResult, SyncScheduler, SyncTarget,
    TimeSource,
};
pub use service::{AccountOrderingDependencies, AccountOrderingService};
