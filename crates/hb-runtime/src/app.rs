//! # Runtime Wiring
//!
//! ## Startup Sequence (`serve`)
//!
//! 1. Take the data directory lock (persistent backends only)
//! 2. Open the storage backend
//! 3. Build the ordering service and the sync scheduler
//! 4. Spawn the sync worker
//! 5. Serve HTTP until the shutdown future resolves
//! 6. Stop the worker and release the lock

use crate::config::{RuntimeConfig, StorageBackend};
use crate::storage::open_store;
use crate::worker::{log_sync, run_sync_worker};
use anyhow::Context;
use hb_account_ordering::{
    AccountOrderingDependencies, AccountOrderingService, ChannelSyncScheduler, DatabaseLock,
    KeyValueStore, MigrationOutcome, Migrator, SyncReceiver, SystemTimeSource,
};
use hb_gateway::Gateway;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

pub type Service =
    AccountOrderingService<Box<dyn KeyValueStore>, SystemTimeSource, ChannelSyncScheduler>;

/// An open store, together with the lock that guards it.
pub struct OpenedStore {
    pub store: Box<dyn KeyValueStore>,
    _lock: Option<DatabaseLock>,
}

/// Lock the data directory and open the configured backend.
pub fn open(config: &RuntimeConfig) -> anyhow::Result<OpenedStore> {
    let lock = match config.storage {
        StorageBackend::Memory => None,
        StorageBackend::File | StorageBackend::Rocksdb => Some(
            DatabaseLock::acquire(&config.data_dir).context("Failed to lock data directory")?,
        ),
    };
    let store = open_store(config)?;
    Ok(OpenedStore { store, _lock: lock })
}

/// Assemble the service and its sync queue over an opened store.
pub fn build_service(
    config: &RuntimeConfig,
    store: Box<dyn KeyValueStore>,
) -> (Service, ChannelSyncScheduler, SyncReceiver) {
    let (scheduler, receiver) = ChannelSyncScheduler::new();
    let service = AccountOrderingService::new(
        AccountOrderingDependencies {
            kv_store: store,
            time_source: SystemTimeSource,
            sync_scheduler: scheduler.clone(),
        },
        config.ordering.clone(),
    );
    (service, scheduler, receiver)
}

/// Apply pending migrations and report each one.
pub fn migrate(config: &RuntimeConfig) -> anyhow::Result<Vec<MigrationOutcome>> {
    let OpenedStore { mut store, _lock } = open(config)?;
    let outcomes = Migrator::run(&mut store, &SystemTimeSource).context("Migration failed")?;

    for outcome in &outcomes {
        match outcome {
            MigrationOutcome::Applied { name, summary } => {
                info!(migration = name, summary = ?summary, "[runtime] Migration applied");
            }
            MigrationOutcome::AlreadyApplied { name } => {
                info!(migration = name, "[runtime] Migration already applied, skipping");
            }
        }
    }
    Ok(outcomes)
}

/// Serve the gateway until `shutdown` resolves.
pub async fn serve<F>(config: RuntimeConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("===========================================");
    info!("  Hearthbook Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let OpenedStore { store, _lock } = open(&config)?;

    let applied = Migrator::applied(&store).context("Failed to read migration status")?;
    if applied.len() < Migrator::migrations().len() {
        warn!("[runtime] Pending migrations; run `hb-runtime migrate`");
    }

    let (service, scheduler, receiver) = build_service(&config, store);
    let service = Arc::new(RwLock::new(service));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let worker = tokio::spawn(run_sync_worker(
        receiver,
        scheduler,
        shutdown_rx,
        log_sync,
    ));

    info!(
        storage = ?config.storage,
        data_dir = %config.data_dir.display(),
        policy = ?config.ordering.reorder_policy,
        "[runtime] Service ready"
    );

    let gateway = Gateway::new(config.gateway.clone(), Arc::clone(&service))
        .context("Invalid gateway configuration")?;
    let served = gateway.serve(shutdown).await;

    if shutdown_tx.send(true).is_err() {
        warn!("[runtime] Sync worker already stopped");
    }
    if let Err(e) = worker.await {
        warn!(error = %e, "[runtime] Sync worker panicked");
    }

    served.context("Gateway failed")?;
    info!("[runtime] Shutdown complete");
    Ok(())
}
