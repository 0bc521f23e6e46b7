//! # Channel Sync Scheduler
//!
//! Hands sync requests to a background worker over an unbounded tokio
//! channel. A target stays "in flight" from `sync_later` until the worker
//! calls [`ChannelSyncScheduler::mark_complete`].

use crate::domain::errors::SyncError;
use crate::ports::outbound::{SyncScheduler, SyncTarget};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receiving half handed to the sync worker.
pub type SyncReceiver = mpsc::UnboundedReceiver<SyncTarget>;

#[derive(Clone)]
pub struct ChannelSyncScheduler {
    sender: mpsc::UnboundedSender<SyncTarget>,
    in_flight: Arc<Mutex<HashSet<SyncTarget>>>,
}

impl ChannelSyncScheduler {
    pub fn new() -> (Self, SyncReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            sender,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        };
        (scheduler, receiver)
    }

    /// Worker callback: the job for `target` finished (successfully or not).
    pub fn mark_complete(&self, target: &SyncTarget) {
        self.in_flight.lock().remove(target);
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }
}

impl SyncScheduler for ChannelSyncScheduler {
    fn is_syncing(&self, target: &SyncTarget) -> bool {
        self.in_flight.lock().contains(target)
    }

    fn sync_later(&self, target: SyncTarget) -> Result<bool, SyncError> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(target) {
            return Ok(false);
        }
        if self.sender.send(target).is_err() {
            in_flight.remove(&target);
            return Err(SyncError::QueueClosed);
        }
        Ok(true)
    }
}
