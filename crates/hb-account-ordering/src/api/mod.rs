//! # Wire Boundary
//!
//! Request payloads, response views and the handlers that turn domain
//! errors into caller-visible kinds. Transport-agnostic; the HTTP gateway is
//! a thin layer on top.

pub mod handler;
pub mod payloads;

pub use payloads::{
    AccountGroupView, AccountView, CreateFamilyRequest, FamilyView, ReorderRequest,
};
