use super::*;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::SyncDispatch;
use crate::ports::outbound::SyncTarget;

impl<KV, TS, SS> AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    /// Fire-and-forget: the caller learns only whether a job was requested.
    pub(super) fn dispatch_sync(&self, target: SyncTarget) -> Result<SyncDispatch, OrderingError> {
        if !self.sync_scheduler.sync_later(target)? {
            tracing::debug!(%target, "[accounts] Sync already in flight");
            return Ok(SyncDispatch::AlreadySyncing);
        }

        tracing::info!(%target, "[accounts] Sync requested");
        Ok(SyncDispatch::Enqueued)
    }
}
