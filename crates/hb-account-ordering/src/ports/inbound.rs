//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Account Ordering subsystem.
//!
//! Every operation takes the calling family explicitly. Account lookups are
//! scoped to that family: an identifier owned by another family is reported
//! exactly like one that does not exist.

use crate::domain::entities::{Account, Family, NewAccount};
use crate::domain::errors::OrderingError;
use crate::domain::ordering::OrderedAccounts;
use crate::domain::value_objects::{AccountOrder, SyncDispatch};
use shared_types::{AccountId, FamilyId};

/// Primary API for account ordering.
///
/// Reads take `&self`, mutations take `&mut self`. A caller sharing one
/// service between threads must serialize mutations; default position
/// assignment reads the family maximum and writes in one step.
pub trait AccountOrderingApi {
    /// Create a family.
    ///
    /// ## Errors
    ///
    /// - `InvalidFamily`: blank or overlong name, malformed currency
    fn create_family(&mut self, name: &str, currency: &str) -> Result<Family, OrderingError>;

    fn find_family(&self, family_id: &FamilyId) -> Result<Family, OrderingError>;

    /// Create an account in `family_id`.
    ///
    /// Without an explicit position the account is placed after the family's
    /// highest position, or at 0 when the family has none.
    ///
    /// ## Errors
    ///
    /// - `FamilyNotFound`: unknown family
    /// - `ValidationFailed`: field validation failed
    fn create_account(
        &mut self,
        family_id: &FamilyId,
        new_account: NewAccount,
    ) -> Result<Account, OrderingError>;

    /// Family-scoped lookup.
    ///
    /// ## Errors
    ///
    /// - `AccountNotFound`: unknown id, or an id owned by another family
    fn find_account(
        &self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError>;

    /// The family's accounts in display order (position ascending with
    /// unpositioned accounts last, then creation time, then id).
    fn ordered_accounts(&self, family_id: &FamilyId) -> Result<OrderedAccounts, OrderingError>;

    /// Assign position `i` to the `i`th listed account.
    ///
    /// ## Atomicity
    ///
    /// Every update is staged and validated first; the batch is committed in
    /// one write. Any error leaves storage untouched.
    ///
    /// ## Errors
    ///
    /// - `BatchTooLarge`: more identifiers than `max_reorder_batch`
    /// - `FamilyNotFound`: unknown family
    /// - `AccountNotFound`: first listed id that does not resolve within the family
    /// - `ValidationFailed`: an updated record failed validation
    /// - `IncompleteOrder`: the policy requires the full account set
    /// - `DuplicateInOrder`: the policy requires the full account set and an
    ///   id was listed twice
    fn reorder(&mut self, family_id: &FamilyId, order: &AccountOrder) -> Result<(), OrderingError>;

    /// Remove an account. Remaining accounts keep their positions.
    fn destroy_account(
        &mut self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<Account, OrderingError>;

    /// Request a background sync of one account unless one is in flight.
    fn sync_account(
        &self,
        family_id: &FamilyId,
        account_id: &AccountId,
    ) -> Result<SyncDispatch, OrderingError>;

    /// Request a background sync of the whole family unless one is in flight.
    fn sync_family(&self, family_id: &FamilyId) -> Result<SyncDispatch, OrderingError>;
}
