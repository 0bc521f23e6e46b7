//! Backfill positions for accounts created before ordering existed.
//!
//! Per family: accounts sorted by `(created_at, id)` get positions `0..n`,
//! written as one batch. A family in which any account already has a
//! position is left alone, so the pass is safe to repeat.

use super::{Migration, MigrationError, MigrationSummary};
use crate::adapters::serializer::{decode, encode};
use crate::domain::entities::Account;
use crate::domain::ordering::creation_order;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::FamilyId;
use std::collections::BTreeMap;

const NAME: &str = "m20250528_000001_add_account_positions";

/// Counts from one backfill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub families_positioned: usize,
    pub families_skipped: usize,
    pub accounts_positioned: usize,
}

pub struct AddAccountPositions;

impl AddAccountPositions {
    /// Run the backfill directly, without the migration marker.
    pub fn backfill(store: &mut dyn KeyValueStore) -> Result<BackfillReport, MigrationError> {
        let storage = |source| MigrationError::Storage { name: NAME, source };
        let serialization = |source| MigrationError::Serialization { name: NAME, source };

        let mut families: BTreeMap<FamilyId, Vec<Account>> = BTreeMap::new();
        for (_, value) in store
            .prefix_scan(KeyPrefix::Account.as_bytes())
            .map_err(storage)?
        {
            let account: Account = decode(&value).map_err(serialization)?;
            families.entry(account.family_id).or_default().push(account);
        }

        let mut report = BackfillReport::default();

        for (family_id, mut accounts) in families {
            if accounts.iter().any(|a| a.position.is_some()) {
                tracing::debug!(family_id = %family_id, "[accounts] Family already positioned, skipping");
                report.families_skipped += 1;
                continue;
            }

            accounts.sort_by(creation_order);

            let mut operations = Vec::with_capacity(accounts.len());
            for (index, mut account) in accounts.into_iter().enumerate() {
                account.position = Some(backfill_position(family_id, index)?);
                operations.push(BatchOperation::put(
                    KeyPrefix::account_key(&account.family_id, &account.id),
                    encode(&account).map_err(serialization)?,
                ));
            }

            let count = operations.len();
            store.atomic_batch_write(operations).map_err(storage)?;

            tracing::info!(
                family_id = %family_id,
                account_count = count,
                "[accounts] Backfilled account positions"
            );
            report.families_positioned += 1;
            report.accounts_positioned += count;
        }

        Ok(report)
    }
}

fn backfill_position(family_id: FamilyId, index: usize) -> Result<u32, MigrationError> {
    u32::try_from(index).map_err(|_| MigrationError::PositionOverflow {
        name: NAME,
        family_id,
        index,
    })
}

impl Migration for AddAccountPositions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn up(&self, store: &mut dyn KeyValueStore) -> Result<MigrationSummary, MigrationError> {
        Self::backfill(store).map(MigrationSummary::Backfill)
    }
}
