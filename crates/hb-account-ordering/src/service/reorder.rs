//! # Bulk Reorder
//!
//! Resolve, validate and stage every listed account, then commit the whole
//! batch in one atomic write. Nothing touches the store before the commit, so
//! a failure anywhere leaves every position as it was.

use super::*;
use crate::config::ReorderPolicy;
use crate::domain::entities::Account;
use crate::domain::errors::OrderingError;
use crate::domain::invariants::position_collisions;
use crate::domain::validation::{validate_account, validate_position};
use crate::domain::value_objects::AccountOrder;
use shared_types::{AccountId, FamilyId};
use std::collections::HashMap;

impl<KV, TS, SS> AccountOrderingService<KV, TS, SS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SS: SyncScheduler,
{
    pub(super) fn apply_reorder(
        &mut self,
        family_id: &FamilyId,
        order: &AccountOrder,
    ) -> Result<(), OrderingError> {
        if order.len() > self.config.max_reorder_batch {
            return Err(OrderingError::BatchTooLarge {
                size: order.len(),
                max: self.config.max_reorder_batch,
            });
        }

        self.load_family(family_id)?;

        if order.is_empty() && self.config.reorder_policy == ReorderPolicy::AllowPartial {
            tracing::debug!(family_id = %family_id, "[accounts] Empty reorder, nothing to do");
            return Ok(());
        }

        let mut family_accounts: HashMap<AccountId, Account> = self
            .load_family_accounts(family_id)?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let staged = self.stage_positions(&family_accounts, order)?;

        if self.config.reorder_policy == ReorderPolicy::RequireComplete
            && staged.len() != family_accounts.len()
        {
            return Err(OrderingError::IncompleteOrder {
                listed: staged.len(),
                total: family_accounts.len(),
            });
        }

        let operations = staged
            .iter()
            .map(Self::stage_account)
            .collect::<Result<Vec<_>, _>>()?;
        self.kv_store.atomic_batch_write(operations)?;

        tracing::info!(
            family_id = %family_id,
            account_count = staged.len(),
            "[accounts] Reordered accounts"
        );

        for account in staged {
            family_accounts.insert(account.id, account);
        }
        for collision in position_collisions(family_accounts.values()) {
            tracing::warn!(
                family_id = %family_id,
                position = collision.position,
                account_count = collision.account_ids.len(),
                "[accounts] Partial reorder left accounts sharing a position"
            );
        }

        Ok(())
    }

    /// Updated copies of the listed accounts, first-appearance order. A
    /// repeated id keeps the position of its last occurrence, unless the
    /// policy requires a complete order, which rejects it.
    fn stage_positions(
        &self,
        family_accounts: &HashMap<AccountId, Account>,
        order: &AccountOrder,
    ) -> Result<Vec<Account>, OrderingError> {
        let mut staged: Vec<Account> = Vec::with_capacity(order.len());
        let mut slots: HashMap<AccountId, usize> = HashMap::with_capacity(order.len());

        for (index, account_id) in order.assignments() {
            let slot = match slots.get(&account_id) {
                Some(_) if self.config.reorder_policy == ReorderPolicy::RequireComplete => {
                    return Err(OrderingError::DuplicateInOrder { account_id });
                }
                Some(&slot) => slot,
                None => {
                    let account = family_accounts
                        .get(&account_id)
                        .ok_or_else(|| OrderingError::not_found(account_id))?;
                    staged.push(account.clone());
                    slots.insert(account_id, staged.len() - 1);
                    staged.len() - 1
                }
            };

            let account = &mut staged[slot];
            let position = validate_position(index as u64, self.config.max_position).map_err(
                |failure| OrderingError::ValidationFailed {
                    account_id,
                    failure,
                },
            )?;
            account.position = Some(position);
            validate_account(account, &self.config)
                .map_err(|failure| OrderingError::ValidationFailed { account_id, failure })?;
        }

        Ok(staged)
    }
}
