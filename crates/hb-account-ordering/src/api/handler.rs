//! Request handlers
//!
//! The operation boundary. Every failure is logged here with its kind and
//! message and then reduced to an [`ErrorKind`]; callers outside the process
//! only ever see the kind. Internal failures are logged with full debug
//! detail.

use super::payloads::{
    account_list, grouped_account_list, AccountGroupView, AccountView, CreateFamilyRequest,
    FamilyView, ReorderRequest,
};
use crate::domain::entities::NewAccount;
use crate::domain::errors::{ErrorKind, OrderingError};
use crate::domain::value_objects::SyncDispatch;
use crate::ports::inbound::AccountOrderingApi;
use shared_types::{AccountId, FamilyId};
use tracing::{error, info, warn};

/// Log `err` for `operation` and return its kind.
pub fn report(
    operation: &'static str,
    family_id: Option<&FamilyId>,
    err: OrderingError,
) -> ErrorKind {
    let kind = err.kind();
    let family = family_id.map(ToString::to_string).unwrap_or_default();
    match kind {
        ErrorKind::Internal => error!(
            operation,
            family_id = %family,
            kind = kind.as_str(),
            detail = ?err,
            "[accounts] {} failed: {}",
            operation,
            err
        ),
        _ => warn!(
            operation,
            family_id = %family,
            kind = kind.as_str(),
            "[accounts] {} rejected: {}",
            operation,
            err
        ),
    }
    kind
}

pub fn create_family<S: AccountOrderingApi>(
    service: &mut S,
    request: &CreateFamilyRequest,
) -> Result<FamilyView, ErrorKind> {
    service
        .create_family(&request.name, &request.currency)
        .map(|family| FamilyView::from(&family))
        .map_err(|e| report("create_family", None, e))
}

pub fn create_account<S: AccountOrderingApi>(
    service: &mut S,
    family_id: &FamilyId,
    request: NewAccount,
) -> Result<AccountView, ErrorKind> {
    service
        .create_account(family_id, request)
        .map(|account| AccountView::from(&account))
        .map_err(|e| report("create_account", Some(family_id), e))
}

pub fn find_account<S: AccountOrderingApi>(
    service: &S,
    family_id: &FamilyId,
    account_id: &str,
) -> Result<AccountView, ErrorKind> {
    parse_account_id(account_id)
        .and_then(|id| service.find_account(family_id, &id))
        .map(|account| AccountView::from(&account))
        .map_err(|e| report("find_account", Some(family_id), e))
}

pub fn list_accounts<S: AccountOrderingApi>(
    service: &S,
    family_id: &FamilyId,
) -> Result<Vec<AccountView>, ErrorKind> {
    service
        .ordered_accounts(family_id)
        .map(|accounts| account_list(&accounts))
        .map_err(|e| report("list_accounts", Some(family_id), e))
}

pub fn list_grouped<S: AccountOrderingApi>(
    service: &S,
    family_id: &FamilyId,
) -> Result<Vec<AccountGroupView>, ErrorKind> {
    service
        .ordered_accounts(family_id)
        .map(|accounts| grouped_account_list(&accounts))
        .map_err(|e| report("list_grouped", Some(family_id), e))
}

/// Bulk reorder. Shape is checked here, before the service sees anything.
pub fn update_order<S: AccountOrderingApi>(
    service: &mut S,
    family_id: &FamilyId,
    request: &ReorderRequest,
    max_entries: usize,
) -> Result<(), ErrorKind> {
    let result = request
        .to_order(max_entries)
        .and_then(|order| service.reorder(family_id, &order).map(|()| order.len()));

    match result {
        Ok(count) => {
            info!(family_id = %family_id, account_count = count, "[accounts] Order updated");
            Ok(())
        }
        Err(e) => Err(report("update_order", Some(family_id), e)),
    }
}

pub fn destroy_account<S: AccountOrderingApi>(
    service: &mut S,
    family_id: &FamilyId,
    account_id: &str,
) -> Result<(), ErrorKind> {
    parse_account_id(account_id)
        .and_then(|id| service.destroy_account(family_id, &id))
        .map(|_| ())
        .map_err(|e| report("destroy_account", Some(family_id), e))
}

pub fn sync_account<S: AccountOrderingApi>(
    service: &S,
    family_id: &FamilyId,
    account_id: &str,
) -> Result<SyncDispatch, ErrorKind> {
    parse_account_id(account_id)
        .and_then(|id| service.sync_account(family_id, &id))
        .map_err(|e| report("sync_account", Some(family_id), e))
}

pub fn sync_all<S: AccountOrderingApi>(
    service: &S,
    family_id: &FamilyId,
) -> Result<SyncDispatch, ErrorKind> {
    service
        .sync_family(family_id)
        .map_err(|e| report("sync_all", Some(family_id), e))
}

/// Path identifiers that do not parse name no account.
fn parse_account_id(raw: &str) -> Result<AccountId, OrderingError> {
    AccountId::parse(raw).map_err(|_| OrderingError::not_found(raw))
}
