//! Wire payloads
//!
//! Request bodies as clients send them and response views of the domain
//! types. Identifiers always travel as strings.

use crate::domain::entities::{Account, AccountKind, Classification, Family};
use crate::domain::errors::OrderingError;
use crate::domain::ordering::{KindGroup, OrderedAccounts};
use crate::domain::value_objects::AccountOrder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{AccountId, Timestamp};

/// Body of a bulk reorder request.
///
/// `account_ids` is kept as a raw JSON value so a wrongly shaped body can be
/// told apart from an unknown identifier.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub account_ids: Value,
}

impl ReorderRequest {
    pub fn new(account_ids: Value) -> Self {
        Self { account_ids }
    }

    /// Check the shape and produce the typed order.
    ///
    /// Not an array, too many entries or a non-string entry is malformed. A
    /// string that is not an identifier can never name an account, so it
    /// reports not-found like any other unknown id.
    pub fn to_order(&self, max_entries: usize) -> Result<AccountOrder, OrderingError> {
        let entries = self
            .account_ids
            .as_array()
            .ok_or_else(|| OrderingError::MalformedOrder {
                reason: format!("expected an array, got {}", json_type(&self.account_ids)),
            })?;

        if entries.len() > max_entries {
            return Err(OrderingError::BatchTooLarge {
                size: entries.len(),
                max: max_entries,
            });
        }

        let raw: Vec<&str> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.as_str().ok_or_else(|| OrderingError::MalformedOrder {
                    reason: format!("entry {index} is {}, expected a string", json_type(entry)),
                })
            })
            .collect::<Result<_, _>>()?;

        raw.into_iter()
            .map(|id| AccountId::parse(id).map_err(|_| OrderingError::not_found(id)))
            .collect()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateFamilyRequest {
    pub name: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyView {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub created_at: Timestamp,
}

impl From<&Family> for FamilyView {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id.to_string(),
            name: family.name.clone(),
            currency: family.currency.clone(),
            created_at: family.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub kind: AccountKind,
    pub classification: Classification,
    pub subtype: Option<String>,
    pub currency: String,
    pub balance: i64,
    pub position: Option<u32>,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            kind: account.kind,
            classification: account.classification(),
            subtype: account.subtype.clone(),
            currency: account.currency.clone(),
            balance: account.balance,
            position: account.position,
            created_at: account.created_at,
        }
    }
}

/// One kind's accounts in a grouped listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroupView {
    pub kind: AccountKind,
    pub label: String,
    pub classification: Classification,
    pub accounts: Vec<AccountView>,
}

impl From<&KindGroup<'_>> for AccountGroupView {
    fn from(group: &KindGroup<'_>) -> Self {
        Self {
            kind: group.kind,
            label: group.kind.display_name().to_string(),
            classification: group.kind.classification(),
            accounts: group.accounts.iter().map(|a| AccountView::from(*a)).collect(),
        }
    }
}

pub fn account_list(accounts: &OrderedAccounts) -> Vec<AccountView> {
    accounts.iter().map(AccountView::from).collect()
}

pub fn grouped_account_list(accounts: &OrderedAccounts) -> Vec<AccountGroupView> {
    accounts
        .grouped_by_kind()
        .iter()
        .map(AccountGroupView::from)
        .collect()
}
