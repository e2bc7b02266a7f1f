use serde::{Deserialize, Serialize};

/// Sync lifecycle of the in-memory journal.
///
/// `Unsynced` until a load or save has succeeded once, `Syncing` while a
/// save is in flight, `Synced` otherwise. A failed save never advances the
/// state or the recorded timestamp; it falls back to whatever held before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    Unsynced,
    Synced,
    Syncing,
}
