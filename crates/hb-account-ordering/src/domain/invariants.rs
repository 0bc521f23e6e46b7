//! # Ordering Invariants
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Unique positions | no two accounts of a family share a non-null position |
//! | Total order | the display comparator never reports two accounts equal |
//!
//! A partial reorder can legitimately leave collisions behind (unlisted
//! accounts keep their old values). The service reports them through
//! [`position_collisions`] rather than rejecting the write.

use super::entities::Account;
use super::ordering::display_order;
use shared_types::AccountId;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A non-null position held by more than one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCollision {
    pub position: u32,
    pub account_ids: Vec<AccountId>,
}

/// All positions shared by two or more accounts, ascending by position.
pub fn position_collisions<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Vec<PositionCollision> {
    let mut by_position: BTreeMap<u32, Vec<AccountId>> = BTreeMap::new();
    for account in accounts {
        if let Some(position) = account.position {
            by_position.entry(position).or_default().push(account.id);
        }
    }

    by_position
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(position, mut account_ids)| {
            account_ids.sort();
            PositionCollision {
                position,
                account_ids,
            }
        })
        .collect()
}

pub fn has_unique_positions<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> bool {
    position_collisions(accounts).is_empty()
}

/// True when `accounts` is strictly increasing under the display order.
pub fn is_display_ordered(accounts: &[Account]) -> bool {
    accounts
        .windows(2)
        .all(|pair| display_order(&pair[0], &pair[1]) == Ordering::Less)
}
