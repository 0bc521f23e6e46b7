//! # Account Ordering Service Tests

use super::*;
use crate::adapters::{ChannelSyncScheduler, InMemoryKVStore, ManualTimeSource, SyncReceiver};
use crate::config::ReorderPolicy;
use crate::domain::entities::{Account, AccountKind, NewAccount};
use crate::domain::errors::{ErrorKind, KVStoreError, OrderingError, ValidationFailure};
use crate::domain::value_objects::{AccountOrder, SyncDispatch};
use crate::ports::inbound::AccountOrderingApi;
use crate::ports::outbound::{BatchOperation, ScanResult, SyncTarget};
use shared_types::{AccountId, FamilyId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type TestService = AccountOrderingService<SwitchableStore, Arc<ManualTimeSource>, ChannelSyncScheduler>;

/// In-memory store whose batch commits fail while `fail_commits` is set.
struct SwitchableStore {
    inner: InMemoryKVStore,
    fail_commits: Arc<AtomicBool>,
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner.put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.inner.delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(KVStoreError::IOError {
                message: "disk full".to_string(),
            });
        }
        self.inner.atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.inner.prefix_scan(prefix)
    }
}

struct Harness {
    service: TestService,
    clock: Arc<ManualTimeSource>,
    scheduler: ChannelSyncScheduler,
    fail_commits: Arc<AtomicBool>,
    _receiver: SyncReceiver,
}

fn harness_with(config: OrderingConfig) -> Harness {
    let clock = Arc::new(ManualTimeSource::new(1_000));
    let (scheduler, receiver) = ChannelSyncScheduler::new();
    let fail_commits = Arc::new(AtomicBool::new(false));
    let deps = AccountOrderingDependencies {
        kv_store: SwitchableStore {
            inner: InMemoryKVStore::new(),
            fail_commits: Arc::clone(&fail_commits),
        },
        time_source: Arc::clone(&clock),
        sync_scheduler: scheduler.clone(),
    };
    Harness {
        service: AccountOrderingService::new(deps, config),
        clock,
        scheduler,
        fail_commits,
        _receiver: receiver,
    }
}

fn harness() -> Harness {
    harness_with(OrderingConfig::default())
}

fn create(h: &mut Harness, family: &FamilyId, name: &str) -> Account {
    h.clock.advance(10);
    h.service
        .create_account(family, NewAccount::new(name, AccountKind::Depository, "USD"))
        .unwrap()
}

fn positions(service: &TestService, family: &FamilyId, ids: &[AccountId]) -> Vec<Option<u32>> {
    ids.iter()
        .map(|id| service.find_account(family, id).unwrap().position)
        .collect()
}

fn listed_ids(service: &TestService, family: &FamilyId) -> Vec<AccountId> {
    service
        .ordered_accounts(family)
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect()
}

// =============================================================================
// Creation and default positions
// =============================================================================

#[test]
fn test_first_account_gets_position_zero() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    let account = create(&mut h, &family.id, "Checking");
    assert_eq!(account.position, Some(0));
}

#[test]
fn test_default_position_is_max_plus_one() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    h.service
        .create_account(
            &family.id,
            NewAccount::new("Brokerage", AccountKind::Investment, "USD").with_position(7),
        )
        .unwrap();
    let next = create(&mut h, &family.id, "Savings");

    assert_eq!(next.position, Some(8));
}

#[test]
fn test_default_position_ignores_other_families() {
    let mut h = harness();
    let ours = h.service.create_family("Ours", "USD").unwrap();
    let theirs = h.service.create_family("Theirs", "USD").unwrap();

    for name in ["a", "b", "c"] {
        create(&mut h, &theirs.id, name);
    }
    let account = create(&mut h, &ours.id, "First");

    assert_eq!(account.position, Some(0));
}

#[test]
fn test_create_in_unknown_family() {
    let mut h = harness();
    let result = h.service.create_account(
        &FamilyId::new(),
        NewAccount::new("Orphan", AccountKind::Depository, "USD"),
    );

    assert!(matches!(result, Err(OrderingError::FamilyNotFound { .. })));
}

#[test]
fn test_create_validates_fields() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    let result = h.service.create_account(
        &family.id,
        NewAccount::new("", AccountKind::Depository, "USD"),
    );
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(h.service.ordered_accounts(&family.id).unwrap().is_empty());
}

#[test]
fn test_create_rejects_position_past_limit() {
    let mut h = harness_with(OrderingConfig {
        max_position: 5,
        ..OrderingConfig::default()
    });
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    h.service
        .create_account(
            &family.id,
            NewAccount::new("Top", AccountKind::Depository, "USD").with_position(5),
        )
        .unwrap();
    let result = h
        .service
        .create_account(&family.id, NewAccount::new("Next", AccountKind::Depository, "USD"));

    assert!(matches!(
        result,
        Err(OrderingError::ValidationFailed {
            failure: ValidationFailure::PositionOutOfRange { position: 6, max: 5 },
            ..
        })
    ));
}

#[test]
fn test_family_validation() {
    let mut h = harness();
    let result = h.service.create_family("Dylan Family", "dollars");
    assert!(matches!(result, Err(OrderingError::InvalidFamily { .. })));
}

#[test]
fn test_family_roundtrip() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    assert_eq!(h.service.find_family(&family.id).unwrap(), family);
    assert_eq!(family.created_at, 1_000);
    assert_eq!(
        h.service.find_family(&FamilyId::new()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

// =============================================================================
// Ordering query
// =============================================================================

#[test]
fn test_listing_follows_positions() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    assert_eq!(listed_ids(&h.service, &family.id), vec![a.id, b.id, c.id]);
}

#[test]
fn test_listing_unknown_family() {
    let h = harness();
    let err = h.service.ordered_accounts(&FamilyId::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// =============================================================================
// Bulk reorder
// =============================================================================

#[test]
fn test_reorder_assigns_list_indices() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    h.service
        .reorder(&family.id, &AccountOrder::new(vec![c.id, a.id, b.id]))
        .unwrap();

    assert_eq!(
        positions(&h.service, &family.id, &[c.id, a.id, b.id]),
        vec![Some(0), Some(1), Some(2)]
    );
    assert_eq!(listed_ids(&h.service, &family.id), vec![c.id, a.id, b.id]);
}

#[test]
fn test_reorder_is_idempotent() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let order = AccountOrder::new(vec![b.id, a.id]);

    h.service.reorder(&family.id, &order).unwrap();
    let once = positions(&h.service, &family.id, &[a.id, b.id]);
    h.service.reorder(&family.id, &order).unwrap();
    let twice = positions(&h.service, &family.id, &[a.id, b.id]);

    assert_eq!(once, twice);
}

#[test]
fn test_reorder_unknown_id_changes_nothing() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");

    let result = h
        .service
        .reorder(&family.id, &AccountOrder::new(vec![b.id, AccountId::new(), a.id]));

    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id]),
        vec![Some(0), Some(1)]
    );
}

#[test]
fn test_reorder_foreign_id_is_not_found() {
    let mut h = harness();
    let ours = h.service.create_family("Ours", "USD").unwrap();
    let theirs = h.service.create_family("Theirs", "USD").unwrap();
    let mine = create(&mut h, &ours.id, "Mine");
    let foreign = create(&mut h, &theirs.id, "Foreign");

    let result = h
        .service
        .reorder(&ours.id, &AccountOrder::new(vec![foreign.id, mine.id]));

    assert!(matches!(result, Err(OrderingError::AccountNotFound { .. })));
    assert_eq!(
        h.service.find_account(&theirs.id, &foreign.id).unwrap().position,
        Some(0)
    );
    assert_eq!(h.service.find_account(&ours.id, &mine.id).unwrap().position, Some(0));
}

#[test]
fn test_reorder_validation_failure_rolls_back() {
    let mut h = harness_with(OrderingConfig {
        max_position: 1,
        ..OrderingConfig::default()
    });
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");

    // Index 2 exceeds max_position after A and B were already staged
    let result = h
        .service
        .reorder(&family.id, &AccountOrder::new(vec![b.id, a.id, b.id]));

    assert_eq!(result.unwrap_err().kind(), ErrorKind::ValidationFailed);
    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id]),
        vec![Some(0), Some(1)]
    );
}

#[test]
fn test_reorder_partial_leaves_others() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    h.service
        .reorder(&family.id, &AccountOrder::new(vec![c.id]))
        .unwrap();

    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id, c.id]),
        vec![Some(0), Some(1), Some(0)]
    );
    // Collision resolved by created_at
    assert_eq!(listed_ids(&h.service, &family.id), vec![a.id, c.id, b.id]);
}

#[test]
fn test_reorder_duplicate_last_wins() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");

    h.service
        .reorder(&family.id, &AccountOrder::new(vec![a.id, b.id, a.id]))
        .unwrap();

    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id]),
        vec![Some(2), Some(1)]
    );
}

#[test]
fn test_reorder_empty_list_is_noop() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");

    h.service.reorder(&family.id, &AccountOrder::default()).unwrap();
    assert_eq!(positions(&h.service, &family.id, &[a.id]), vec![Some(0)]);
}

#[test]
fn test_reorder_batch_limit() {
    let mut h = harness_with(OrderingConfig {
        max_reorder_batch: 2,
        ..OrderingConfig::default()
    });
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let order: AccountOrder = (0..3).map(|_| AccountId::new()).collect();

    let err = h.service.reorder(&family.id, &order).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);
}

#[test]
fn test_require_complete_policy() {
    let mut h = harness_with(OrderingConfig {
        reorder_policy: ReorderPolicy::RequireComplete,
        ..OrderingConfig::default()
    });
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    let result = h
        .service
        .reorder(&family.id, &AccountOrder::new(vec![c.id, a.id]));
    assert!(matches!(
        result,
        Err(OrderingError::IncompleteOrder { listed: 2, total: 3 })
    ));
    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id, c.id]),
        vec![Some(0), Some(1), Some(2)]
    );

    h.service
        .reorder(&family.id, &AccountOrder::new(vec![c.id, a.id, b.id]))
        .unwrap();
    assert_eq!(listed_ids(&h.service, &family.id), vec![c.id, a.id, b.id]);
}

#[test]
fn test_reorder_commit_failure_changes_nothing() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    h.fail_commits.store(true, Ordering::SeqCst);
    let err = h
        .service
        .reorder(&family.id, &AccountOrder::new(vec![c.id, a.id, b.id]))
        .unwrap_err();

    assert!(matches!(err, OrderingError::Storage(KVStoreError::IOError { .. })));
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id, c.id]),
        vec![Some(0), Some(1), Some(2)]
    );
    assert_eq!(listed_ids(&h.service, &family.id), vec![a.id, b.id, c.id]);
}

#[test]
fn test_require_complete_rejects_repeated_id() {
    let mut h = harness_with(OrderingConfig {
        reorder_policy: ReorderPolicy::RequireComplete,
        ..OrderingConfig::default()
    });
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");

    let err = h
        .service
        .reorder(&family.id, &AccountOrder::new(vec![a.id, a.id, b.id]))
        .unwrap_err();
    assert!(matches!(err, OrderingError::DuplicateInOrder { account_id } if account_id == a.id));
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(
        positions(&h.service, &family.id, &[a.id, b.id]),
        vec![Some(0), Some(1)]
    );
}

// =============================================================================
// Lookup, destroy, sync
// =============================================================================

#[test]
fn test_find_is_family_scoped() {
    let mut h = harness();
    let ours = h.service.create_family("Ours", "USD").unwrap();
    let theirs = h.service.create_family("Theirs", "USD").unwrap();
    let foreign = create(&mut h, &theirs.id, "Foreign");

    let result = h.service.find_account(&ours.id, &foreign.id);
    assert!(matches!(result, Err(OrderingError::AccountNotFound { .. })));
}

#[test]
fn test_destroy_keeps_sibling_positions() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");
    let b = create(&mut h, &family.id, "B");
    let c = create(&mut h, &family.id, "C");

    h.service.destroy_account(&family.id, &b.id).unwrap();

    assert_eq!(
        positions(&h.service, &family.id, &[a.id, c.id]),
        vec![Some(0), Some(2)]
    );
    let next = create(&mut h, &family.id, "D");
    assert_eq!(next.position, Some(3));
}

#[test]
fn test_sync_account_once_while_in_flight() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();
    let a = create(&mut h, &family.id, "A");

    assert_eq!(
        h.service.sync_account(&family.id, &a.id).unwrap(),
        SyncDispatch::Enqueued
    );
    assert_eq!(
        h.service.sync_account(&family.id, &a.id).unwrap(),
        SyncDispatch::AlreadySyncing
    );

    h.scheduler.mark_complete(&SyncTarget::Account {
        family_id: family.id,
        account_id: a.id,
    });
    assert_eq!(
        h.service.sync_account(&family.id, &a.id).unwrap(),
        SyncDispatch::Enqueued
    );
}

#[test]
fn test_sync_foreign_account_is_not_found() {
    let mut h = harness();
    let ours = h.service.create_family("Ours", "USD").unwrap();
    let theirs = h.service.create_family("Theirs", "USD").unwrap();
    let foreign = create(&mut h, &theirs.id, "Foreign");

    let err = h.service.sync_account(&ours.id, &foreign.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(h.scheduler.in_flight_count(), 0);
}

#[test]
fn test_sync_family() {
    let mut h = harness();
    let family = h.service.create_family("Dylan Family", "USD").unwrap();

    assert_eq!(h.service.sync_family(&family.id).unwrap(), SyncDispatch::Enqueued);
    assert_eq!(
        h.service.sync_family(&family.id).unwrap(),
        SyncDispatch::AlreadySyncing
    );
}

#[test]
fn test_concurrent_sync_requests_enqueue_once() {
    let mut h = harness();
    let family_id = h.service.create_family("Dylan Family", "USD").unwrap().id;

    let dispatches: Vec<SyncDispatch> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| s.spawn(|| h.service.sync_family(&family_id).unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    let enqueued = dispatches
        .iter()
        .filter(|d| **d == SyncDispatch::Enqueued)
        .count();
    assert_eq!(enqueued, 1);
    assert_eq!(h.scheduler.in_flight_count(), 1);
}
