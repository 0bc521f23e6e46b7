//! # Hearthbook Gateway
//!
//! REST surface for the account ordering subsystem.
//!
//! ```text
//! client ── x-family-id ──> [TraceLayer] -> [TimeoutLayer] -> route
//!                                                              │
//!                                           spawn_blocking + RwLock<service>
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/health` | 200 |
//! | POST | `/families` | 201 |
//! | GET | `/accounts` | 200 |
//! | GET | `/accounts/grouped` | 200 |
//! | POST | `/accounts` | 201 |
//! | GET | `/accounts/:id` | 200 |
//! | DELETE | `/accounts/:id` | 204 |
//! | PATCH | `/accounts/update_order` | 200 (no body) |
//! | POST | `/accounts/:id/sync` | 202 |
//! | POST | `/accounts/sync_all` | 202 |
//!
//! Failures carry no body: 400 bad input, 401 missing family, 404 not found,
//! 422 validation failed, 500 internal.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod service;

pub use config::{ConfigError, GatewayConfig};
pub use error::{status_for, ApiError, GatewayError};
pub use extract::{FamilyContext, FAMILY_HEADER};
pub use service::Gateway;
