//! # Domain Entities
//!
//! Families and the financial accounts they own.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, FamilyId, Timestamp};

/// A household. The tenancy boundary for accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    /// ISO-4217 code used as the family's reporting currency.
    pub currency: String,
    pub created_at: Timestamp,
}

/// Broad balance-sheet side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Asset,
    Liability,
}

/// Type of the account's underlying holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Depository,
    Investment,
    Crypto,
    Property,
    Vehicle,
    CreditCard,
    Loan,
    OtherAsset,
    OtherLiability,
}

impl AccountKind {
    pub fn classification(self) -> Classification {
        match self {
            AccountKind::CreditCard | AccountKind::Loan | AccountKind::OtherLiability => {
                Classification::Liability
            }
            _ => Classification::Asset,
        }
    }

    /// Human readable label used when rendering grouped lists.
    pub fn display_name(self) -> &'static str {
        match self {
            AccountKind::Depository => "Cash",
            AccountKind::Investment => "Investments",
            AccountKind::Crypto => "Crypto",
            AccountKind::Property => "Properties",
            AccountKind::Vehicle => "Vehicles",
            AccountKind::CreditCard => "Credit Cards",
            AccountKind::Loan => "Loans",
            AccountKind::OtherAsset => "Other Assets",
            AccountKind::OtherLiability => "Other Liabilities",
        }
    }
}

/// A financial account owned by exactly one family.
///
/// `position` is the user-controlled display order. `None` only occurs for
/// records created before positions existed and is cleared by the backfill
/// migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub family_id: FamilyId,
    pub name: String,
    pub kind: AccountKind,
    pub subtype: Option<String>,
    pub currency: String,
    /// Balance in minor currency units.
    pub balance: i64,
    pub position: Option<u32>,
    pub created_at: Timestamp,
}

impl Account {
    pub fn classification(&self) -> Classification {
        self.kind.classification()
    }
}

/// Attributes for a new account. Identity and timestamps are assigned by the
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub subtype: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub balance: i64,
    /// Explicit position. When absent the next free position is assigned.
    #[serde(default)]
    pub position: Option<u32>,
    /// Explicit creation time (imports and tests). Defaults to now.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, kind: AccountKind, currency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            subtype: None,
            currency: currency.into(),
            balance: 0,
            position: None,
            created_at: None,
        }
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }
}
