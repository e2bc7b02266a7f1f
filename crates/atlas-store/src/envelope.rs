//! The envelope slot store: the persistence adapter the sync orchestrator
//! writes through.
//!
//! Exactly one [`SyncEnvelope`] lives under the fixed [`DATA_KEY`] slot.
//! Export and import move the same schema through dated JSON files so a
//! user can carry their journal between devices without any network.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, info, warn};

use atlas_shared::constants::{BACKUP_FILE_PREFIX, DATA_KEY};
use atlas_shared::models::SyncEnvelope;

use crate::area::{StorageArea, StorageUsage};
use crate::error::{Result, StoreError};

/// Result of reading the durable slot.
///
/// Distinguishes "never synced" from "present but unreadable" so startup
/// can log corruption instead of mistaking it for a fresh install.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The slot is absent.
    Empty,
    /// The slot exists but its contents failed to parse.
    Corrupt(String),
    /// The slot held a valid envelope.
    Loaded(SyncEnvelope),
}

/// Durable storage for exactly one [`SyncEnvelope`] under a fixed key,
/// plus file export/import and quota introspection.
///
/// The store never mutates a live envelope; `save` stamps a copy.
#[derive(Debug, Clone)]
pub struct EnvelopeStore {
    area: StorageArea,
}

impl EnvelopeStore {
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }

    /// Open the default store in the platform data directory.
    pub async fn open() -> Result<Self> {
        Ok(Self::new(StorageArea::open().await?))
    }

    /// Stamp a copy of the envelope with the current time, serialize it
    /// and write it to the fixed slot, overwriting any prior value.
    /// Returns the stamp (epoch milliseconds).
    pub async fn save(&self, envelope: &SyncEnvelope) -> Result<i64> {
        let stamped = SyncEnvelope {
            last_sync_timestamp: Utc::now().timestamp_millis(),
            ..envelope.clone()
        };
        let json = serde_json::to_string(&stamped)?;
        self.area.set(DATA_KEY, &json).await?;

        debug!(
            bytes = json.len(),
            stamp = stamped.last_sync_timestamp,
            "envelope saved"
        );
        Ok(stamped.last_sync_timestamp)
    }

    /// Read the slot back as a tagged [`LoadOutcome`].
    ///
    /// Parse failures are reported as [`LoadOutcome::Corrupt`] rather than
    /// an `Err` so callers can recover without conflating a broken slot
    /// with an empty one. I/O faults still surface as errors.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let Some(raw) = self.area.get(DATA_KEY).await? else {
            return Ok(LoadOutcome::Empty);
        };

        match serde_json::from_str::<SyncEnvelope>(&raw) {
            Ok(envelope) => Ok(LoadOutcome::Loaded(envelope)),
            Err(e) => {
                warn!(error = %e, "stored envelope failed to parse");
                Ok(LoadOutcome::Corrupt(e.to_string()))
            }
        }
    }

    /// Write a pretty-printed copy of the envelope to
    /// `<dir>/coffee_atlas_backup_<ISO-date>.json` and return the path.
    ///
    /// Export never mutates or re-stamps the envelope: the file carries
    /// whatever timestamp the snapshot already had.
    pub async fn export_to_file(&self, envelope: &SyncEnvelope, dir: &Path) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(envelope)?;

        fs::create_dir_all(dir).await?;
        let file_name = format!("{BACKUP_FILE_PREFIX}{}.json", Utc::now().format("%Y-%m-%d"));
        let path = dir.join(file_name);
        fs::write(&path, json.as_bytes()).await?;

        info!(path = %path.display(), "journal exported");
        Ok(path)
    }

    /// Read and validate a user-supplied backup file.
    ///
    /// Cancellation is the caller's: dropping the returned future abandons
    /// the read. Validation runs in two stages. The minimum-shape gate
    /// first (the parsed value must carry a numeric `lastSyncTimestamp`,
    /// otherwise [`StoreError::InvalidFormat`]), then a typed decode that
    /// rejects malformed entries as [`StoreError::CorruptData`].
    pub async fn import_from_file(&self, path: &Path) -> Result<SyncEnvelope> {
        let raw = fs::read_to_string(path).await?;

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| StoreError::CorruptData(e.to_string()))?;

        let has_timestamp = value
            .get("lastSyncTimestamp")
            .map(serde_json::Value::is_number)
            .unwrap_or(false);
        if !has_timestamp {
            return Err(StoreError::InvalidFormat);
        }

        let envelope: SyncEnvelope =
            serde_json::from_value(value).map_err(|e| StoreError::CorruptData(e.to_string()))?;

        info!(
            notes = envelope.tasting_notes.len(),
            records = envelope.brewing_records.len(),
            "backup file read"
        );
        Ok(envelope)
    }

    /// Whole-area storage utilization.
    pub async fn usage(&self) -> Result<StorageUsage> {
        self.area.usage().await
    }

    /// Remove the envelope slot only. Other keys in the area are
    /// untouched. Returns `true` when a slot existed.
    pub async fn clear(&self) -> Result<bool> {
        self.area.remove(DATA_KEY).await
    }

    /// Direct access to the underlying area, for subsystems that keep
    /// their own keys beside the envelope slot.
    pub fn area(&self) -> &StorageArea {
        &self.area
    }
}
