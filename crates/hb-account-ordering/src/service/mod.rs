//! # Account Ordering Service
//!
//! The application service implementing [`AccountOrderingApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Owns the key-value store and talks to it only through atomic batches
//! 2. Assigns default positions while holding `&mut self`
//! 3. Stages every reorder write before committing any of them
//! 4. Hands sync requests to the injected scheduler
//!
//! [`AccountOrderingApi`]: crate::ports::inbound::AccountOrderingApi

mod accounts;
mod api;
mod helpers;
mod reorder;
mod sync;
#[cfg(test)]
mod tests;

use crate::config::OrderingConfig;
use crate::ports::outbound::{KeyValueStore, SyncScheduler, TimeSource};

/// The Account Ordering Service.
pub struct AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    /// Key-value store for families and accounts.
    pub(crate) kv_store: KV,
    /// Clock for `created_at` defaults.
    pub(crate) time_source: TS,
    /// Background sync collaborator.
    pub(crate) sync_scheduler: SS,
    pub(crate) config: OrderingConfig,
}

/// Dependencies for AccountOrderingService
pub struct AccountOrderingDependencies<KV, TS, SS> {
    pub kv_store: KV,
    pub time_source: TS,
    pub sync_scheduler: SS,
}

impl<KV, TS, SS> AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    pub fn new(deps: AccountOrderingDependencies<KV, TS, SS>, config: OrderingConfig) -> Self {
        Self {
            kv_store: deps.kv_store,
            time_source: deps.time_source,
            sync_scheduler: deps.sync_scheduler,
            config,
        }
    }

    /// Give up the service and keep its store, e.g. to run maintenance on it.
    pub fn into_kv_store(self) -> KV {
        self.kv_store
    }
}
