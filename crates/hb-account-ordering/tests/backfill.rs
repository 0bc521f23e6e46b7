//! Backfill of legacy accounts through the Migrator.

mod common;

use common::env_with_store;
use hb_account_ordering::adapters::serializer::encode;
use hb_account_ordering::domain::value_objects::KeyPrefix;
use hb_account_ordering::migration::MigrationSummary;
use hb_account_ordering::*;
use shared_types::{AccountId, FamilyId, ID_LEN};

fn put_family(store: &mut InMemoryKVStore, name: &str) -> FamilyId {
    let family = Family {
        id: FamilyId::new(),
        name: name.to_string(),
        currency: "USD".to_string(),
        created_at: 0,
    };
    store
        .put(&KeyPrefix::family_key(&family.id), &encode(&family).unwrap())
        .unwrap();
    family.id
}

fn put_legacy(store: &mut InMemoryKVStore, family: FamilyId, id: AccountId, created_at: u64) {
    let account = Account {
        id,
        family_id: family,
        name: format!("Legacy {created_at}"),
        kind: AccountKind::Depository,
        subtype: None,
        currency: "USD".to_string(),
        balance: 0,
        position: None,
        created_at,
    };
    store
        .put(
            &KeyPrefix::account_key(&family, &id),
            &encode(&account).unwrap(),
        )
        .unwrap();
}

#[test]
fn test_backfill_then_list() {
    let mut store = InMemoryKVStore::new();
    let family = put_family(&mut store, "Legacy Family");

    // Ids chosen so that key order disagrees with creation order
    let t3 = AccountId::from_bytes([1; ID_LEN]);
    let t1 = AccountId::from_bytes([2; ID_LEN]);
    let t2 = AccountId::from_bytes([3; ID_LEN]);
    put_legacy(&mut store, family, t3, 3_000);
    put_legacy(&mut store, family, t1, 1_000);
    put_legacy(&mut store, family, t2, 2_000);

    let clock = ManualTimeSource::new(9_000);
    let outcomes = Migrator::run(&mut store, &clock).unwrap();
    assert!(matches!(
        &outcomes[0],
        MigrationOutcome::Applied {
            summary: MigrationSummary::Backfill(BackfillReport {
                families_positioned: 1,
                accounts_positioned: 3,
                ..
            }),
            ..
        }
    ));

    let mut env = env_with_store(store, OrderingConfig::default());
    assert_eq!(env.positions(&family, &[t1, t2, t3]), vec![Some(0), Some(1), Some(2)]);
    assert_eq!(env.listed(&family), vec![t1, t2, t3]);

    // Creating after backfill continues from the backfilled maximum
    let next = env.accounts(&family, 1);
    assert_eq!(env.positions(&family, &next), vec![Some(3)]);

    // Second migrate run does nothing
    let mut store = env.service.into_kv_store();
    let again = Migrator::run(&mut store, &clock).unwrap();
    assert!(matches!(again[0], MigrationOutcome::AlreadyApplied { .. }));
}

#[test]
fn test_listing_before_backfill_puts_legacy_last() {
    let mut store = InMemoryKVStore::new();
    let family = put_family(&mut store, "Mixed Family");
    let legacy = AccountId::from_bytes([9; ID_LEN]);
    put_legacy(&mut store, family, legacy, 1);

    let mut env = env_with_store(store, OrderingConfig::default());
    let fresh = env.accounts(&family, 2);

    // Legacy account is unpositioned, so new accounts start at 0 and list first
    assert_eq!(env.positions(&family, &fresh), vec![Some(0), Some(1)]);
    assert_eq!(env.listed(&family), vec![fresh[0], fresh[1], legacy]);
}

#[test]
fn test_backfill_is_per_family() {
    let mut store = InMemoryKVStore::new();
    let untouched = put_family(&mut store, "Already Ordered");
    let pending = put_family(&mut store, "Pending");

    put_legacy(&mut store, pending, AccountId::new(), 5);
    put_legacy(&mut store, pending, AccountId::new(), 6);

    let mut env = env_with_store(store, OrderingConfig::default());
    let ordered = env.accounts(&untouched, 2);
    env.service
        .reorder(&untouched, &AccountOrder::new(vec![ordered[1], ordered[0]]))
        .unwrap();

    let mut store = env.service.into_kv_store();
    let report = hb_account_ordering::migration::AddAccountPositions::backfill(&mut store).unwrap();
    assert_eq!(report.families_positioned, 1);
    assert_eq!(report.families_skipped, 1);

    let env = env_with_store(store, OrderingConfig::default());
    assert_eq!(env.positions(&untouched, &ordered), vec![Some(1), Some(0)]);
    let pending_positions: Vec<_> = env
        .service
        .ordered_accounts(&pending)
        .unwrap()
        .iter()
        .map(|a| a.position)
        .collect();
    assert_eq!(pending_positions, vec![Some(0), Some(1)]);
}
