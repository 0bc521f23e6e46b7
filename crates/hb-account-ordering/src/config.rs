//! Configuration for the Account Ordering subsystem

use serde::{Deserialize, Serialize};

/// How a reorder treats accounts missing from the submitted list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderPolicy {
    /// Unlisted accounts keep their old position, which may collide with a
    /// newly assigned one.
    #[default]
    AllowPartial,
    /// The list must name every account of the family exactly once.
    RequireComplete,
}

/// Ordering configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub reorder_policy: ReorderPolicy,
    /// Maximum identifiers accepted in one reorder request (anti-DoS)
    pub max_reorder_batch: usize,
    /// Largest position a validated write may store
    pub max_position: u32,
    /// Maximum account and family name length, in characters
    pub max_name_len: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            reorder_policy: ReorderPolicy::AllowPartial,
            max_reorder_batch: 10_000,
            max_position: i32::MAX as u32,
            max_name_len: 255,
        }
    }
}
