//! # Value Objects
//!
//! Storage keys and the typed reorder input.

use shared_types::{AccountId, FamilyId, ID_LEN};

/// Key prefixes for the key-value store.
///
/// All keys are prefixed to namespace different record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `f:` + family id -> Family
    Family,
    /// `a:` + family id + account id -> Account
    Account,
    /// `m:` + migration name -> MigrationRecord
    Migration,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Family => b"f:",
            KeyPrefix::Account => b"a:",
            KeyPrefix::Migration => b"m:",
        }
    }

    pub fn family_key(family_id: &FamilyId) -> Vec<u8> {
        let mut key = Vec::with_capacity(2 + ID_LEN);
        key.extend_from_slice(KeyPrefix::Family.as_bytes());
        key.extend_from_slice(family_id.as_bytes());
        key
    }

    /// Account keys embed the owning family, so a lookup scoped to the wrong
    /// family simply misses.
    pub fn account_key(family_id: &FamilyId, account_id: &AccountId) -> Vec<u8> {
        let mut key = Self::family_accounts_prefix(family_id);
        key.extend_from_slice(account_id.as_bytes());
        key
    }

    pub fn family_accounts_prefix(family_id: &FamilyId) -> Vec<u8> {
        let mut key = Vec::with_capacity(2 + 2 * ID_LEN);
        key.extend_from_slice(KeyPrefix::Account.as_bytes());
        key.extend_from_slice(family_id.as_bytes());
        key
    }

    pub fn migration_key(name: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(2 + name.len());
        key.extend_from_slice(KeyPrefix::Migration.as_bytes());
        key.extend_from_slice(name.as_bytes());
        key
    }

    /// Split an account key back into its family and account ids.
    pub fn parse_account_key(key: &[u8]) -> Option<(FamilyId, AccountId)> {
        let rest = key.strip_prefix(KeyPrefix::Account.as_bytes())?;
        if rest.len() != 2 * ID_LEN {
            return None;
        }
        let family: [u8; ID_LEN] = rest[..ID_LEN].try_into().ok()?;
        let account: [u8; ID_LEN] = rest[ID_LEN..].try_into().ok()?;
        Some((FamilyId::from_bytes(family), AccountId::from_bytes(account)))
    }
}

/// Target display order submitted by a client.
///
/// Index `i` in the list becomes the new position of the account at that
/// index. The list is already shape-checked; resolving the identifiers
/// against a family happens in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountOrder {
    account_ids: Vec<AccountId>,
}

impl AccountOrder {
    pub fn new(account_ids: Vec<AccountId>) -> Self {
        Self { account_ids }
    }

    pub fn account_ids(&self) -> &[AccountId] {
        &self.account_ids
    }

    pub fn len(&self) -> usize {
        self.account_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.account_ids.is_empty()
    }

    /// `(target_position, account_id)` pairs in list order.
    pub fn assignments(&self) -> impl Iterator<Item = (usize, AccountId)> + '_ {
        self.account_ids.iter().copied().enumerate()
    }
}

impl FromIterator<AccountId> for AccountOrder {
    fn from_iter<I: IntoIterator<Item = AccountId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Outcome of a sync request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDispatch {
    /// A new sync job was requested.
    Enqueued,
    /// A sync for the same target is already in flight; nothing was sent.
    AlreadySyncing,
}
