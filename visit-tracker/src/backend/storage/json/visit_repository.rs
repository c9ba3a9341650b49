//! # Visit Repository
//!
//! Persists the whole visit collection as one JSON document in a single slot.
//!
//! ## Snapshot Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "visits": [
//!     {
//!       "id": "8000000123",
//!       "coords": [51.5, -0.1],
//!       "createdAt": "2025-03-14T12:30:00Z",
//!       "displayDate": "March 14",
//!       "title": "Park",
//!       "summary": "nice",
//!       "rating": 9,
//!       "bathroom": "yes",
//!       "feeding": "no",
//!       "changing": "yes",
//!       "tier": "good"
//!     }
//!   ]
//! }
//! ```
//!
//! Derived fields are stored and read back as-is; nothing is recomputed on
//! load.
//!
//! A bare array is a version 0 snapshot written by the browser version of the
//! tracker. Its records use `date` for the creation time, `custom` for the
//! tier and may hold the rating as a string. They are migrated on load and
//! records that cannot be migrated are skipped. Unreadable records inside a
//! version 1 envelope are skipped the same way.
//!
//! A snapshot that cannot be read is copied to `<key>.corrupt` before the
//! session starts fresh, so the next save does not destroy it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Coords, Tier};

use crate::backend::domain::models::VisitRecord;
use crate::backend::domain::VisitStore;
use crate::backend::storage::traits::{LoadOutcome, SlotStorage, VisitStorage};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Slot holding the visit snapshot unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "visits";

const CORRUPT_SUFFIX: &str = ".corrupt";

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    visits: &'a [VisitRecord],
}

/// Record shape written by the browser version (snapshot version 0)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyVisitRecord {
    id: String,
    coords: Coords,
    date: DateTime<Utc>,
    display_date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    rating: Value,
    #[serde(default)]
    bathroom: String,
    #[serde(default)]
    feeding: String,
    #[serde(default)]
    changing: String,
    custom: String,
}

impl TryFrom<LegacyVisitRecord> for VisitRecord {
    type Error = anyhow::Error;

    fn try_from(record: LegacyVisitRecord) -> Result<Self> {
        let rating = legacy_rating(&record.rating)
            .ok_or_else(|| anyhow::anyhow!("Unreadable rating {} in visit {}", record.rating, record.id))?;
        let tier = record
            .custom
            .parse::<Tier>()
            .map_err(|e| anyhow::anyhow!("Failed to parse tier of visit {}: {}", record.id, e))?;

        Ok(VisitRecord::from_persisted(
            record.id,
            record.coords,
            record.date,
            record.display_date,
            record.title,
            record.summary,
            rating,
            record.bathroom,
            record.feeding,
            record.changing,
            tier,
        ))
    }
}

/// Browser snapshots stored the rating as whatever the input held
fn legacy_rating(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// Slot-backed visit repository
#[derive(Debug, Clone)]
pub struct VisitRepository<S: SlotStorage> {
    connection: S,
    storage_key: String,
}

impl<S: SlotStorage> VisitRepository<S> {
    /// Create a repository using the default `visits` slot
    pub fn new(connection: S) -> Self {
        Self::with_key(connection, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(connection: S, storage_key: impl Into<String>) -> Self {
        Self {
            connection,
            storage_key: storage_key.into(),
        }
    }

    /// Slot that receives unreadable snapshots
    pub fn corrupt_backup_key(&self) -> String {
        format!("{}{}", self.storage_key, CORRUPT_SUFFIX)
    }

    /// Parse snapshot text into visits, or explain why it cannot be read
    fn parse_snapshot(raw: &str) -> std::result::Result<Vec<VisitRecord>, String> {
        let document: Value = serde_json::from_str(raw).map_err(|e| format!("Invalid JSON: {}", e))?;

        match document {
            Value::Object(mut fields) => {
                let version = fields
                    .get("version")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| "Snapshot has no version".to_string())?;
                if version != u64::from(SNAPSHOT_VERSION) {
                    return Err(format!("Unsupported snapshot version {}", version));
                }

                let items = match fields.remove("visits") {
                    Some(Value::Array(items)) => items,
                    Some(other) => return Err(format!("Snapshot visits are not a list: {}", other)),
                    None => return Err("Snapshot has no visits".to_string()),
                };

                let mut visits = Vec::with_capacity(items.len());
                for item in items {
                    match serde_json::from_value::<VisitRecord>(item) {
                        Ok(visit) => visits.push(visit),
                        Err(e) => {
                            warn!("Failed to read visit record: {}. Skipping.", e);
                            continue;
                        }
                    }
                }
                Ok(visits)
            }
            Value::Array(items) => {
                info!("Migrating version 0 snapshot with {} visits", items.len());
                let mut visits = Vec::with_capacity(items.len());
                for item in items {
                    let migrated = serde_json::from_value::<LegacyVisitRecord>(item)
                        .map_err(anyhow::Error::from)
                        .and_then(|legacy| VisitRecord::try_from(legacy));
                    match migrated {
                        Ok(visit) => visits.push(visit),
                        Err(e) => {
                            warn!("Failed to migrate visit record: {}. Skipping.", e);
                            continue;
                        }
                    }
                }
                Ok(visits)
            }
            other => Err(format!("Unexpected snapshot value: {}", other)),
        }
    }
}

impl<S: SlotStorage> VisitStorage for VisitRepository<S> {
    fn save(&self, store: &VisitStore) -> Result<()> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            visits: store.all(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        self.connection.write_slot(&self.storage_key, &json)?;

        debug!("Saved {} visits to slot '{}'", store.len(), self.storage_key);
        Ok(())
    }

    fn load(&self) -> Result<LoadOutcome> {
        let raw = match self.connection.read_slot(&self.storage_key)? {
            Some(raw) => raw,
            None => {
                info!("No saved visits in slot '{}'", self.storage_key);
                return Ok(LoadOutcome::NotFound);
            }
        };

        match Self::parse_snapshot(&raw) {
            Ok(visits) => {
                info!("Loaded {} visits from slot '{}'", visits.len(), self.storage_key);
                Ok(LoadOutcome::Loaded(visits))
            }
            Err(reason) => {
                warn!("Saved visits in slot '{}' are unreadable: {}", self.storage_key, reason);
                let backup_key = self.corrupt_backup_key();
                if let Err(e) = self.connection.write_slot(&backup_key, &raw) {
                    warn!("Failed to back up unreadable visits to '{}': {}", backup_key, e);
                } else {
                    info!("Unreadable visits backed up to slot '{}'", backup_key);
                }
                Ok(LoadOutcome::CorruptData { reason })
            }
        }
    }

    fn reset(&self) -> Result<()> {
        let existed = self.connection.remove_slot(&self.storage_key)?;
        info!("Reset slot '{}' (existed: {})", self.storage_key, existed);
        Ok(())
    }
}
