//! # Core Identifiers
//!
//! Identifier newtypes and the shared timestamp representation.
//!
//! ## Wire Format
//!
//! Identifiers serialize as lowercase hyphenated UUID strings in
//! human-readable formats (JSON) and as 16 raw bytes in binary formats
//! (bincode). Storage keys use [`FamilyId::as_bytes`] / [`AccountId::as_bytes`].

use crate::errors::IdParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Length in bytes of an identifier's binary form.
pub const ID_LEN: usize = 16;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Rebuild an identifier from its storage bytes.
            pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }

            /// Storage representation (16 bytes, big-endian UUID layout).
            pub fn as_bytes(&self) -> &[u8; ID_LEN] {
                self.0.as_bytes()
            }

            /// Parse an identifier received from a client.
            pub fn parse(input: &str) -> Result<Self, IdParseError> {
                if input.trim().is_empty() {
                    return Err(IdParseError::Empty);
                }
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| IdParseError::Malformed {
                        input: input.to_string(),
                    })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a family, the tenancy boundary for accounts.
    FamilyId
);

opaque_id!(
    /// Identifier of a financial account. Stable and opaque to clients.
    AccountId
);
