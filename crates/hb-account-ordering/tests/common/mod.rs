//! Shared setup for integration tests.

#![allow(dead_code)]

use hb_account_ordering::*;
use shared_types::{AccountId, FamilyId};
use std::sync::Arc;

pub type Service<KV> = AccountOrderingService<KV, Arc<ManualTimeSource>, ChannelSyncScheduler>;

pub struct TestEnv<KV: KeyValueStore> {
    pub service: Service<KV>,
    pub clock: Arc<ManualTimeSource>,
    pub receiver: SyncReceiver,
}

pub fn env_with_store<KV: KeyValueStore>(kv_store: KV, config: OrderingConfig) -> TestEnv<KV> {
    let clock = Arc::new(ManualTimeSource::new(1_700_000_000_000));
    let (scheduler, receiver) = ChannelSyncScheduler::new();
    let service = AccountOrderingService::new(
        AccountOrderingDependencies {
            kv_store,
            time_source: Arc::clone(&clock),
            sync_scheduler: scheduler,
        },
        config,
    );
    TestEnv {
        service,
        clock,
        receiver,
    }
}

pub fn memory_env() -> TestEnv<InMemoryKVStore> {
    env_with_store(InMemoryKVStore::new(), OrderingConfig::default())
}

impl<KV: KeyValueStore> TestEnv<KV> {
    pub fn family(&mut self) -> FamilyId {
        self.service.create_family("Test Family", "USD").unwrap().id
    }

    /// Create `count` accounts one millisecond apart.
    pub fn accounts(&mut self, family: &FamilyId, count: usize) -> Vec<AccountId> {
        (0..count)
            .map(|i| {
                self.clock.advance(1);
                self.service
                    .create_account(
                        family,
                        NewAccount::new(format!("Account {i}"), AccountKind::Depository, "USD"),
                    )
                    .unwrap()
                    .id
            })
            .collect()
    }

    pub fn positions(&self, family: &FamilyId, ids: &[AccountId]) -> Vec<Option<u32>> {
        ids.iter()
            .map(|id| self.service.find_account(family, id).unwrap().position)
            .collect()
    }

    pub fn listed(&self, family: &FamilyId) -> Vec<AccountId> {
        self.service
            .ordered_accounts(family)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect()
    }
}
