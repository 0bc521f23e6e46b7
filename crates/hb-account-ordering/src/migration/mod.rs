//! # Data Migrations
//!
//! One-off maintenance passes over stored records. Each migration runs at
//! most once per store: the [`Migrator`] records a marker under
//! `m:<name>` after a migration succeeds and skips it on later runs.
//!
//! Migrations write raw records. They do not go through the service and skip
//! field validation.

mod m20250528_000001_add_account_positions;

pub use m20250528_000001_add_account_positions::{AddAccountPositions, BackfillReport};

use crate::adapters::serializer::{decode, encode};
use crate::domain::errors::{KVStoreError, SerializationError};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore, TimeSource};
use serde::{Deserialize, Serialize};
use shared_types::{FamilyId, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration {name} failed: {source}")]
    Storage {
        name: &'static str,
        #[source]
        source: KVStoreError,
    },

    #[error("Migration {name} hit an unreadable record: {source}")]
    Serialization {
        name: &'static str,
        #[source]
        source: SerializationError,
    },

    #[error("Migration {name} cannot position account {index} of family {family_id}")]
    PositionOverflow {
        name: &'static str,
        family_id: FamilyId,
        index: usize,
    },
}

/// What a migration did, for the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationSummary {
    Backfill(BackfillReport),
}

pub trait Migration {
    /// Unique, sortable name. Used as the marker key.
    fn name(&self) -> &'static str;

    fn up(&self, store: &mut dyn KeyValueStore) -> Result<MigrationSummary, MigrationError>;
}

/// Marker stored once a migration has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub name: String,
    pub applied_at: Timestamp,
}

/// Result of one migration in a [`Migrator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Applied {
        name: &'static str,
        summary: MigrationSummary,
    },
    AlreadyApplied {
        name: &'static str,
    },
}

pub struct Migrator;

impl Migrator {
    pub fn migrations() -> Vec<Box<dyn Migration>> {
        vec![Box::new(AddAccountPositions)]
    }

    /// Apply every pending migration in order.
    pub fn run<KV, TS>(store: &mut KV, clock: &TS) -> Result<Vec<MigrationOutcome>, MigrationError>
    where
        KV: KeyValueStore,
        TS: TimeSource,
    {
        let mut outcomes = Vec::new();

        for migration in Self::migrations() {
            let name = migration.name();
            let marker = KeyPrefix::migration_key(name);
            let storage = |source| MigrationError::Storage { name, source };
            let serialization = |source| MigrationError::Serialization { name, source };

            if store.exists(&marker).map_err(storage)? {
                tracing::info!(migration = name, "[accounts] Migration already applied");
                outcomes.push(MigrationOutcome::AlreadyApplied { name });
                continue;
            }

            tracing::info!(migration = name, "[accounts] Applying migration");
            let summary = migration.up(&mut *store)?;

            let record = MigrationRecord {
                name: name.to_string(),
                applied_at: clock.now(),
            };
            let value = encode(&record).map_err(serialization)?;
            store
                .atomic_batch_write(vec![BatchOperation::put(marker, value)])
                .map_err(storage)?;

            outcomes.push(MigrationOutcome::Applied { name, summary });
        }

        Ok(outcomes)
    }

    /// Markers of every applied migration, by name.
    pub fn applied<KV: KeyValueStore>(store: &KV) -> Result<Vec<MigrationRecord>, MigrationError> {
        let name = "status";
        store
            .prefix_scan(KeyPrefix::Migration.as_bytes())
            .map_err(|source| MigrationError::Storage { name, source })?
            .into_iter()
            .map(|(_, value)| {
                decode(&value).map_err(|source| MigrationError::Serialization { name, source })
            })
            .collect()
    }
}
