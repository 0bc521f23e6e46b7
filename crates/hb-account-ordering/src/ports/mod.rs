//! # Ports Layer
//!
//! Hexagonal architecture ports:
//! - Inbound (Driving): the API this subsystem offers
//! - Outbound (Driven): storage, clock and sync dependencies

pub mod inbound;
pub mod outbound;

pub use inbound::AccountOrderingApi;
pub use outbound::{BatchOperation, KeyValueStore, ScanResult, SyncScheduler, SyncTarget, TimeSource};
