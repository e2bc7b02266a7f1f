//! File-backed local storage area.
//!
//! The mobile app persisted everything in the browser's `localStorage`.
//! [`StorageArea`] reproduces that surface on disk: one UTF-8 text file per
//! key under a base directory, a fixed byte quota, and usage accounting
//! that counts two bytes per UTF-16 code unit the way browser quotas meter
//! string storage.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use atlas_shared::constants::STORAGE_QUOTA_BYTES;

use crate::error::{Result, StoreError};

/// Storage utilization snapshot. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub quota_bytes: u64,
    /// 0–100, rounded.
    pub percentage: u32,
}

/// A quota-limited key/value area rooted at a directory.
#[derive(Debug, Clone)]
pub struct StorageArea {
    root: PathBuf,
    quota_bytes: u64,
}

impl StorageArea {
    /// Open (or create) the default application storage area in the
    /// platform data directory:
    /// - Linux:   `~/.local/share/coffee-atlas/storage`
    /// - macOS:   `~/Library/Application Support/com.coffeeatlas.coffee-atlas/storage`
    /// - Windows: `{FOLDERID_RoamingAppData}\coffeeatlas\coffee-atlas\data\storage`
    pub async fn open() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "coffeeatlas", "coffee-atlas").ok_or(StoreError::NoDataDir)?;
        let root = project_dirs.data_dir().join("storage");
        Self::open_at(root, STORAGE_QUOTA_BYTES).await
    }

    /// Open (or create) a storage area at an explicit path with an explicit
    /// quota.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub async fn open_at(root: impl Into<PathBuf>, quota_bytes: u64) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        info!(path = %root.display(), quota_bytes, "storage area opened");

        Ok(Self { root, quota_bytes })
    }

    /// Read the value stored under `key`, or `None` when absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` under `key`, replacing any prior value.
    ///
    /// Fails with [`StoreError::StorageUnavailable`] when the write would
    /// push the whole area past its quota; the prior value stays intact.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        let current = self.usage().await?;
        let existing = match self.get(key).await? {
            Some(prior) => utf16_width(&prior),
            None => 0,
        };
        let projected = current.used_bytes - existing + utf16_width(value);
        if projected > self.quota_bytes {
            return Err(StoreError::StorageUnavailable(format!(
                "quota exceeded: write would use {projected} of {} bytes",
                self.quota_bytes
            )));
        }

        fs::write(&path, value).await?;
        debug!(key, bytes = value.len(), "key written");
        Ok(())
    }

    /// Remove `key`. Returns `true` when a value existed.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "key removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// List every key currently held in the area.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }

    /// Whole-area usage, counted the way browser quotas meter
    /// `localStorage`: two bytes per UTF-16 code unit of every stored
    /// value, across all keys, not just the envelope slot.
    pub async fn usage(&self) -> Result<StorageUsage> {
        let mut used_bytes = 0u64;
        for key in self.keys().await? {
            if let Some(value) = self.get(&key).await? {
                used_bytes += utf16_width(&value);
            }
        }

        let percentage = ((used_bytes as f64 / self.quota_bytes as f64) * 100.0).round() as u32;

        Ok(StorageUsage {
            used_bytes,
            quota_bytes: self.quota_bytes,
            percentage,
        })
    }

    /// Map a key to its backing file, rejecting anything that could step
    /// outside the area root.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(StoreError::StorageUnavailable(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.root.join(key))
    }
}

/// Two bytes per UTF-16 code unit, the way browsers meter `localStorage`
/// strings.
fn utf16_width(s: &str) -> u64 {
    s.encode_utf16().count() as u64 * 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_area(quota: u64) -> (StorageArea, TempDir) {
        let dir = TempDir::new().unwrap();
        let area = StorageArea::open_at(dir.path(), quota).await.unwrap();
        (area, dir)
    }

    #[tokio::test]
    async fn set_get_round_trip() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        area.set("k", "value").await.unwrap();
        assert_eq!(area.get("k").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;
        assert!(area.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_reports_prior_existence() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        area.set("k", "v").await.unwrap();
        assert!(area.remove("k").await.unwrap());
        assert!(!area.remove("k").await.unwrap());
    }

    #[tokio::test]
    async fn usage_counts_two_bytes_per_utf16_unit() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        area.set("k", "0123456789").await.unwrap();

        let usage = area.usage().await.unwrap();
        assert_eq!(usage.used_bytes, 20);
        assert_eq!(usage.quota_bytes, STORAGE_QUOTA_BYTES);
        assert_eq!(
            usage.percentage,
            ((20.0 / STORAGE_QUOTA_BYTES as f64) * 100.0).round() as u32
        );
    }

    #[tokio::test]
    async fn usage_spans_every_key_in_the_area() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        area.set("a", "12345").await.unwrap();
        area.set("b", "12345").await.unwrap();

        assert_eq!(area.usage().await.unwrap().used_bytes, 20);
    }

    #[tokio::test]
    async fn non_bmp_chars_count_as_two_units() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        // U+1F375 TEACUP WITHOUT HANDLE is a surrogate pair in UTF-16.
        area.set("k", "🍵").await.unwrap();
        assert_eq!(area.usage().await.unwrap().used_bytes, 4);
    }

    #[tokio::test]
    async fn quota_overflow_is_rejected_and_prior_value_kept() {
        let (area, _dir) = test_area(10).await;

        area.set("k", "abc").await.unwrap();

        let err = area.set("k", "0123456789").await.unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
        assert_eq!(area.get("k").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn replacing_a_value_frees_its_old_footprint() {
        let (area, _dir) = test_area(10).await;

        area.set("k", "abcde").await.unwrap();
        // 5 chars out, 5 chars in: still exactly at quota.
        area.set("k", "vwxyz").await.unwrap();
        assert_eq!(area.usage().await.unwrap().used_bytes, 10);
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let (area, _dir) = test_area(STORAGE_QUOTA_BYTES).await;

        for key in ["../evil", "a/b", "a\\b", ""] {
            assert!(area.set(key, "v").await.is_err(), "key {key:?} accepted");
        }
    }
}
