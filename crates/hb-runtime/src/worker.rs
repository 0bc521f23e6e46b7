//! # Sync Worker
//!
//! Drains the scheduler's queue. Each target is handed to the job callback
//! and then marked complete, so a later request for it enqueues again.

use hb_account_ordering::{ChannelSyncScheduler, SyncReceiver, SyncTarget};
use tokio::sync::watch;
use tracing::{debug, info};

/// Run until `shutdown` flips to `true` or every sender is gone.
///
/// Returns the number of targets processed.
pub async fn run_sync_worker<F>(
    mut receiver: SyncReceiver,
    scheduler: ChannelSyncScheduler,
    mut shutdown: watch::Receiver<bool>,
    mut job: F,
) -> usize
where
    F: FnMut(&SyncTarget) + Send,
{
    let mut processed = 0;
    info!("[runtime] Sync worker started");

    loop {
        tokio::select! {
            next = receiver.recv() => match next {
                Some(target) => {
                    debug!(target = %target, "[runtime] Sync started");
                    job(&target);
                    scheduler.mark_complete(&target);
                    processed += 1;
                }
                None => break,
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("[runtime] Sync worker shutdown signal received");
                    break;
                }
            }
        }
    }

    info!(processed, "[runtime] Sync worker stopped");
    processed
}

/// Default job: record the request. Provider integrations plug in here.
pub fn log_sync(target: &SyncTarget) {
    info!(target = %target, "[runtime] Sync requested");
}
