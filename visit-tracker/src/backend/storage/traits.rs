//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably by the session controller.

use anyhow::Result;

use crate::backend::domain::models::VisitRecord;
use crate::backend::domain::VisitStore;

/// Durable key-value slots holding serialized text
///
/// Implementations only move strings around; what goes into a slot is decided
/// by the repositories built on top.
pub trait SlotStorage: Send + Sync {
    /// Read a slot, `None` if it has never been written or was removed
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot
    /// Returns true if the slot existed
    fn remove_slot(&self, key: &str) -> Result<bool>;
}

/// What a load found in the visits slot
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing has been saved yet
    NotFound,
    /// A readable snapshot, in saved order
    Loaded(Vec<VisitRecord>),
    /// The slot exists but could not be read as a snapshot
    CorruptData { reason: String },
}

impl LoadOutcome {
    /// Visits to hydrate with; empty unless the snapshot was readable
    pub fn into_visits(self) -> Vec<VisitRecord> {
        match self {
            LoadOutcome::Loaded(visits) => visits,
            LoadOutcome::NotFound | LoadOutcome::CorruptData { .. } => Vec::new(),
        }
    }
}

/// Trait defining the interface for persisting the visit collection
pub trait VisitStorage {
    /// Save the whole store, overwriting the previous snapshot
    fn save(&self, store: &VisitStore) -> Result<()>;

    /// Load the last snapshot
    /// Only failures of the underlying slot storage are errors
    fn load(&self) -> Result<LoadOutcome>;

    /// Delete the snapshot
    fn reset(&self) -> Result<()>;
}
