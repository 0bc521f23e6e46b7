//! # Family and Account Lifecycle
//!
//! Creation with default position assignment, lookup and removal.

use super::*;
use crate::adapters::serializer::encode;
use crate::domain::entities::{Account, Family, NewAccount};
use crate::domain::errors::OrderingError;
use crate::domain::ordering::{next_position, OrderedAccounts};
use crate::domain::validation::{validate_account, validate_family, validate_position};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::BatchOperation;
use shared_types::{AccountId, FamilyId};

impl<KV, TS, SS> AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    pub(super) fn insert_family(&mut self, name: &str, currency: &str) -> Result<Family, OrderingError> {
        let family = Family {
            id: FamilyId::new(),
            name: name.to_string(),
            currency: currency.to_string(),
            created_at: self.time_source.now(),
        };
        validate_family(&family, &self.config)
            .map_err(|failure| OrderingError::InvalidFamily { failure })?;

        self.kv_store.atomic_batch_write(vec![BatchOperation::put(
            KeyPrefix::family_key(&family.id),
            encode(&family)?,
        )])?;

        tracing::info!(family_id = %family.id, "[accounts] Created family");
        Ok(family)
    }

    /// Read the family's highest position and insert the new account in one
    /// `&mut self` section, so no other create can interleave.
    pub(super) fn insert_account(
        &mut self,
        family_id: &FamilyId,
        new_account: NewAccount,
    ) -> Result<Account, OrderingError> {
        self.load_family(family_id)?;

        let id = AccountId::new();
        let position = match new_account.position {
            Some(position) => position,
            None => {
                let siblings = self.load_family_accounts(family_id)?;
                validate_position(next_position(&siblings), self.config.max_position).map_err(
                    |failure| OrderingError::ValidationFailed {
                        account_id: id,
                        failure,
                    },
                )?
            }
        };

        let account = Account {
            id,
            family_id: *family_id,
            name: new_account.name,
            kind: new_account.kind,
            subtype: new_account.subtype,
            currency: new_account.currency,
            balance: new_account.balance,
            position: Some(position),
            created_at: new_account
                .created_at
                .unwrap_or_else(|| self.time_source.now()),
        };
        validate_account(&account, &self.config)
            .map_err(|failure| OrderingError::ValidationFailed { account_id: id, failure })?;

        self.kv_store
            .atomic_batch_write(vec![Self::stage_account(&account)?])?;

        tracing::info!(
            family_id = %family_id,
            account_id = %account.id,
            position,
            "[accounts] Created account"
        );
        Ok(account)
    }

    pub(super) fn list_ordered(&self, family_id: &FamilyId) -> Result<OrderedAccounts, OrderingError> {
        self.load_family(family_id)?;
        let accounts = self.load_family_accounts(family_id)?;
        Ok(OrderedAccounts::from_unordered(accounts))
    }

    pub(super) fn remove_account(
        &mut self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError> {
        let account = self.load_account(family_id, account_id)?;

        self.kv_store
            .atomic_batch_write(vec![BatchOperation::delete(KeyPrefix::account_key(
                family_id, account_id,
            ))])?;

        tracing::info!(
            family_id = %family_id,
            account_id = %account_id,
            "[accounts] Destroyed account"
        );
        Ok(account)
    }
}
