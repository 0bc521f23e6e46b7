//! # Domain Layer
//!
//! Pure domain logic with no I/O.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod ordering;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use ordering::{KindGroup, OrderedAccounts};
pub use value_objects::*;
