//! # Account Ordering Service - Helper Methods
//!
//! Record loading and write staging shared by the operations.

use super::*;
use crate::adapters::serializer::{decode, encode};
use crate::domain::entities::{Account, Family};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::BatchOperation;
use shared_types::{AccountId, FamilyId};

impl<KV, TS, SS> AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    pub(crate) fn load_family(&self, family_id: &FamilyId) -> Result<Family, OrderingError> {
        let bytes = self
            .kv_store
            .get(&KeyPrefix::family_key(family_id))?
            .ok_or(OrderingError::FamilyNotFound {
                family_id: *family_id,
            })?;
        Ok(decode(&bytes)?)
    }

    /// Family-scoped account lookup. An account of another family lives
    /// under a different key, so it misses here exactly like an unknown id.
    pub(crate) fn load_account(
        &self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError> {
        let bytes = self
            .kv_store
            .get(&KeyPrefix::account_key(family_id, account_id))?
            .ok_or_else(|| OrderingError::not_found(account_id))?;
        Ok(decode(&bytes)?)
    }

    /// Every account of the family, in storage key order.
    pub(crate) fn load_family_accounts(
        &self,
        family_id: &FamilyId,
    ) -> Result<Vec<Account>, OrderingError> {
        self.kv_store
            .prefix_scan(&KeyPrefix::family_accounts_prefix(family_id))?
            .into_iter()
            .map(|(_, value)| decode::<Account>(&value).map_err(OrderingError::from))
            .collect()
    }

    pub(crate) fn stage_account(account: &Account) -> Result<BatchOperation, OrderingError> {
        Ok(BatchOperation::put(
            KeyPrefix::account_key(&account.family_id, &account.id),
            encode(account)?,
        ))
    }
}
