//! # Shared Types Crate
//!
//! Identifier newtypes and time primitives used across the Hearthbook
//! workspace.
//!
//! ## Design Principles
//!
//! - **Opaque identifiers**: `FamilyId` and `AccountId` wrap a UUID and are
//!   rendered as plain strings on the wire. Callers never see the inner type.
//! - **Family tenancy**: every account belongs to exactly one family; the
//!   family identifier is passed explicitly to every operation.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
