//! # Domain Errors
//!
//! Error types for the Account Ordering subsystem.
//!
//! Every [`OrderingError`] maps onto exactly one [`ErrorKind`]. The kind is the
//! only thing a caller outside the process ever learns about a failure; the
//! message stays in the server log.

use shared_types::{AccountId, FamilyId};
use thiserror::Error;

/// Caller-visible classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request shape is wrong (not a list, too long, wrong element type).
    BadInput,
    /// Unknown identifier, or one owned by another family.
    NotFound,
    /// A record failed field validation on write.
    ValidationFailed,
    /// Anything unexpected. Details are logged, never returned.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadInput => "bad-input",
            ErrorKind::NotFound => "not-found",
            ErrorKind::ValidationFailed => "validation-failed",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("name can't be blank")]
    BlankName,

    #[error("name is too long ({len} > {max} characters)")]
    NameTooLong { len: usize, max: usize },

    #[error("currency {0:?} is not a three-letter ISO code")]
    InvalidCurrency(String),

    #[error("position {position} exceeds maximum {max}")]
    PositionOutOfRange { position: u64, max: u32 },
}

/// All errors that can occur in account ordering.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The submitted order is not a list of identifier strings.
    #[error("Malformed account order: {reason}")]
    MalformedOrder { reason: String },

    /// Reorder list exceeds the configured limit.
    #[error("Reorder batch too large: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Identifier does not resolve to an account of the calling family.
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: String },

    /// Family does not exist.
    #[error("Family not found: {family_id}")]
    FamilyNotFound { family_id: FamilyId },

    /// Record failed validation on write.
    #[error("Validation failed for account {account_id}: {failure}")]
    ValidationFailed {
        account_id: AccountId,
        failure: ValidationFailure,
    },

    /// Family record failed validation on write.
    #[error("Validation failed for family: {failure}")]
    InvalidFamily { failure: ValidationFailure },

    /// A complete order was required but some accounts were left out.
    #[error("Incomplete account order: {listed} of {total} accounts listed")]
    IncompleteOrder { listed: usize, total: usize },

    /// A complete order was required but an account was listed twice.
    #[error("Account {account_id} listed more than once in a complete order")]
    DuplicateInOrder { account_id: AccountId },

    /// Key-value store failure.
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// Record encoding failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Sync request could not be handed off.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderingError::MalformedOrder { .. } | OrderingError::BatchTooLarge { .. } => {
                ErrorKind::BadInput
            }
            OrderingError::AccountNotFound { .. } | OrderingError::FamilyNotFound { .. } => {
                ErrorKind::NotFound
            }
            OrderingError::ValidationFailed { .. }
            | OrderingError::InvalidFamily { .. }
            | OrderingError::IncompleteOrder { .. }
            | OrderingError::DuplicateInOrder { .. } => ErrorKind::ValidationFailed,
            OrderingError::Storage(_)
            | OrderingError::Serialization(_)
            | OrderingError::Sync(_)
            | OrderingError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(account_id: impl ToString) -> Self {
        OrderingError::AccountNotFound {
            account_id: account_id.to_string(),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// Another process holds the store.
    #[error("KV store locked: {message}")]
    Locked { message: String },
}

/// Record (de)serialization error.
#[derive(Debug, Clone, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

/// Sync scheduling errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The worker side of the queue is gone.
    #[error("sync queue closed")]
    QueueClosed,
}
