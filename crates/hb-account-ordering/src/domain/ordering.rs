//! # Display Ordering
//!
//! The nils-last display order and the default position policy.
//!
//! ```text
//! position asc (None after every Some) -> created_at asc -> id asc
//! ```
//!
//! The three keys together form a total order, so two reads of the same data
//! always list accounts identically even when positions collide or are
//! missing.

use super::entities::{Account, AccountKind};
use std::cmp::Ordering;

/// Compare two accounts by display order.
pub fn display_order(a: &Account, b: &Account) -> Ordering {
    let by_position = match (a.position, b.position) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_position
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Creation order used by the position backfill.
pub fn creation_order(a: &Account, b: &Account) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Position for a new account: one past the family's highest position, or 0
/// when no sibling has one.
pub fn next_position<'a>(siblings: impl IntoIterator<Item = &'a Account>) -> u64 {
    siblings
        .into_iter()
        .filter_map(|account| account.position)
        .max()
        .map(|max| u64::from(max) + 1)
        .unwrap_or(0)
}

/// A family's accounts in display order.
///
/// Finite and restartable: `iter()` may be called any number of times and
/// always yields the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedAccounts {
    accounts: Vec<Account>,
}

impl OrderedAccounts {
    /// Sort `accounts` into display order.
    pub fn from_unordered(mut accounts: Vec<Account>) -> Self {
        accounts.sort_by(display_order);
        Self { accounts }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn as_slice(&self) -> &[Account] {
        &self.accounts
    }

    /// Group by account kind. Groups appear in the order their first member
    /// appears; members keep their relative display order.
    pub fn grouped_by_kind(&self) -> Vec<KindGroup<'_>> {
        let mut groups: Vec<KindGroup<'_>> = Vec::new();
        for account in &self.accounts {
            match groups.iter_mut().find(|g| g.kind == account.kind) {
                Some(group) => group.accounts.push(account),
                None => groups.push(KindGroup {
                    kind: account.kind,
                    accounts: vec![account],
                }),
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a OrderedAccounts {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}

/// Accounts of one kind, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindGroup<'a> {
    pub kind: AccountKind,
    pub accounts: Vec<&'a Account>,
}
