//! # Account Ordering API Implementation

use super::*;
use crate::domain::entities::{Account, Family, NewAccount};
use crate::domain::errors::OrderingError;
use crate::domain::ordering::OrderedAccounts;
use crate::domain::value_objects::{AccountOrder, SyncDispatch};
use crate::ports::inbound::AccountOrderingApi;
use crate::ports::outbound::SyncTarget;
use shared_types::{AccountId, FamilyId};

impl<KV, TS, SS> AccountOrderingApi for AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    fn create_family(&mut self, name: &str, currency: &str) -> Result<Family, OrderingError> {
        self.insert_family(name, currency)
    }

    fn find_family(&self, family_id: &FamilyId) -> Result<Family, OrderingError> {
        self.load_family(family_id)
    }

    fn create_account(
        &mut self,
        family_id: &FamilyId,
        new_account: NewAccount,
    ) -> Result<Account, OrderingError> {
        self.insert_account(family_id, new_account)
    }

    fn find_account(
        &self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError> {
        self.load_account(family_id, account_id)
    }

    fn ordered_accounts(&self, family_id: &FamilyId) -> Result<OrderedAccounts, OrderingError> {
        self.list_ordered(family_id)
    }

    fn reorder(&mut self, family_id: &FamilyId, order: &AccountOrder) -> Result<(), OrderingError> {
        self.apply_reorder(family_id, order)
    }

    fn destroy_account(
        &mut self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError> {
        self.remove_account(family_id, account_id)
    }

    fn sync_account(
        &self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<SyncDispatch, OrderingError> {
        self.load_account(family_id, account_id)?;
        self.dispatch_sync(SyncTarget::Account {
            family_id: *family_id,
            account_id: *account_id,
        })
    }

    fn sync_family(&self, family_id: &FamilyId) -> Result<SyncDispatch, OrderingError> {
        self.load_family(family_id)?;
        self.dispatch_sync(SyncTarget::Family(*family_id))
    }
}
