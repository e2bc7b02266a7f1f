//! The sync orchestrator.
//!
//! Owns the canonical in-memory snapshot of the user's journal (profile,
//! tasting notes, brewing records), applies mutations synchronously in call
//! order, and mirrors the snapshot to the envelope store. Views hold a
//! cloned [`SyncOrchestrator`] handle and read immutable copies; every
//! change funnels through the operations here.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use atlas_shared::models::{
    BrewingRecord, NewBrewingRecord, NewTastingNote, SyncEnvelope, TastingNote, UserProfile,
};
use atlas_shared::seed;
use atlas_store::{EnvelopeStore, LoadOutcome, Result, StorageUsage};

use crate::status::SyncStatus;

/// Counts reported back to the UI after an import.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub profile_replaced: bool,
    pub notes_imported: usize,
    pub records_imported: usize,
}

/// Live journal state. Mutated only under the orchestrator's lock.
#[derive(Debug)]
struct Journal {
    profile: UserProfile,
    tasting_notes: Vec<TastingNote>,
    brewing_records: Vec<BrewingRecord>,
    status: SyncStatus,
    /// Epoch milliseconds of the last successful load or save.
    last_sync: Option<i64>,
    /// Whether a load or save has ever succeeded. Auto-sync stays off
    /// until a baseline exists so the seed dataset is not persisted before
    /// the user has opted in.
    baseline: bool,
}

impl Journal {
    fn seeded() -> Self {
        Self {
            profile: seed::default_profile(),
            tasting_notes: seed::seed_tasting_notes(),
            brewing_records: Vec::new(),
            status: SyncStatus::Unsynced,
            last_sync: None,
            baseline: false,
        }
    }

    /// Snapshot the journal as a serializable envelope.
    fn envelope(&self) -> SyncEnvelope {
        SyncEnvelope {
            user_profile: Some(self.profile.clone()),
            tasting_notes: self.tasting_notes.clone(),
            brewing_records: self.brewing_records.clone(),
            last_sync_timestamp: self
                .last_sync
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        }
    }
}

struct Inner {
    store: EnvelopeStore,
    journal: Mutex<Journal>,
    /// Serializes saves: concurrent `sync_now` calls queue here instead of
    /// interleaving writes, and each queued save snapshots the journal as
    /// it stands when its turn comes.
    write_gate: tokio::sync::Mutex<()>,
    /// In-flight background syncs. Dropping the orchestrator aborts them,
    /// so an orphaned task never touches a torn-down journal.
    tasks: Mutex<JoinSet<()>>,
}

impl Inner {
    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn sync_now(&self) -> Result<i64> {
        let _gate = self.write_gate.lock().await;

        let (envelope, previous) = {
            let mut journal = self.journal();
            let previous = journal.status;
            journal.status = SyncStatus::Syncing;
            (journal.envelope(), previous)
        };

        match self.store.save(&envelope).await {
            Ok(stamp) => {
                let mut journal = self.journal();
                journal.status = SyncStatus::Synced;
                journal.last_sync = Some(stamp);
                journal.baseline = true;
                debug!(stamp, "journal synced");
                Ok(stamp)
            }
            Err(e) => {
                let mut journal = self.journal();
                journal.status = previous;
                warn!(error = %e, "sync failed; slot left behind memory until the next save");
                Err(e)
            }
        }
    }
}

/// Handle to the orchestrator. Clones share one journal; the handle is
/// cheap to pass into views and background tasks.
#[derive(Clone)]
pub struct SyncOrchestrator {
    inner: Arc<Inner>,
}

impl SyncOrchestrator {
    /// Build the orchestrator from whatever the durable slot holds.
    ///
    /// A valid envelope hydrates the journal and establishes the sync
    /// baseline. An absent slot yields the built-in demonstration dataset
    /// in state `Unsynced`. A corrupt slot or an unreadable storage area is
    /// logged and handled the same way: startup never fails on bad local
    /// data, but the cases stay distinguishable in the logs and via
    /// [`EnvelopeStore::load`].
    pub async fn initialize(store: EnvelopeStore) -> Self {
        let journal = match store.load().await {
            Ok(LoadOutcome::Loaded(envelope)) => {
                info!(
                    notes = envelope.tasting_notes.len(),
                    records = envelope.brewing_records.len(),
                    last_sync = envelope.last_sync_timestamp,
                    "journal hydrated from local slot"
                );
                Journal {
                    profile: envelope.user_profile.unwrap_or_else(seed::default_profile),
                    tasting_notes: envelope.tasting_notes,
                    brewing_records: envelope.brewing_records,
                    status: SyncStatus::Synced,
                    last_sync: Some(envelope.last_sync_timestamp),
                    baseline: true,
                }
            }
            Ok(LoadOutcome::Corrupt(detail)) => {
                warn!(%detail, "local slot is corrupt; starting from the seed dataset");
                Journal::seeded()
            }
            Ok(LoadOutcome::Empty) => {
                debug!("no local slot; starting from the seed dataset");
                Journal::seeded()
            }
            Err(e) => {
                warn!(error = %e, "local storage unavailable; running in memory only");
                Journal::seeded()
            }
        };

        Self {
            inner: Arc::new(Inner {
                store,
                journal: Mutex::new(journal),
                write_gate: tokio::sync::Mutex::new(()),
                tasks: Mutex::new(JoinSet::new()),
            }),
        }
    }

    /// Open the default store in the platform data directory and
    /// initialize from it.
    pub async fn open() -> Result<Self> {
        Ok(Self::initialize(EnvelopeStore::open().await?).await)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a tasting note.
    ///
    /// Assigns a fresh UUID and today's calendar date, prepends it (the
    /// list is newest-first), and schedules a sync. Returns the stored
    /// note.
    pub fn add_tasting_note(&self, draft: NewTastingNote) -> TastingNote {
        let note = TastingNote {
            id: Uuid::new_v4().to_string(),
            bean_name: draft.bean_name,
            grinder: draft.grinder,
            grind_size: draft.grind_size,
            dripper: draft.dripper,
            water_temp: draft.water_temp,
            coffee_amount: draft.coffee_amount,
            ratio: draft.ratio,
            score: draft.score,
            notes: draft.notes,
            date: Utc::now().date_naive(),
            image_url: draft.image_url,
        };

        self.inner.journal().tasting_notes.insert(0, note.clone());
        debug!(id = %note.id, bean = %note.bean_name, "tasting note added");

        self.schedule_sync();
        note
    }

    /// Remove a tasting note by id. An unknown id is a silent no-op and
    /// returns `false`.
    pub fn delete_tasting_note(&self, id: &str) -> bool {
        let removed = {
            let mut journal = self.inner.journal();
            let before = journal.tasting_notes.len();
            journal.tasting_notes.retain(|n| n.id != id);
            journal.tasting_notes.len() != before
        };

        if removed {
            debug!(%id, "tasting note deleted");
            self.schedule_sync();
        }
        removed
    }

    /// Append a brewing record. Symmetric to [`add_tasting_note`].
    ///
    /// [`add_tasting_note`]: Self::add_tasting_note
    pub fn add_brewing_record(&self, draft: NewBrewingRecord) -> BrewingRecord {
        let record = BrewingRecord {
            id: Uuid::new_v4().to_string(),
            bean_name: draft.bean_name,
            grinder: draft.grinder,
            grind_size: draft.grind_size,
            dripper: draft.dripper,
            water_temp: draft.water_temp,
            coffee_amount: draft.coffee_amount,
            ratio: draft.ratio,
            score: draft.score,
            notes: draft.notes,
            date: Utc::now().date_naive(),
            image_url: draft.image_url,
            bean_id: draft.bean_id,
            brew_method: draft.brew_method,
            brew_time: draft.brew_time,
        };

        self.inner
            .journal()
            .brewing_records
            .insert(0, record.clone());
        debug!(id = %record.id, bean = %record.bean_name, "brewing record added");

        self.schedule_sync();
        record
    }

    // ------------------------------------------------------------------
    // Sync
    // ------------------------------------------------------------------

    /// Persist the current snapshot to the durable slot.
    ///
    /// Safe to call concurrently with itself: callers queue on the write
    /// gate and each write serializes the journal as it stands at write
    /// time, so no half-updated envelope ever reaches disk. On failure the
    /// journal keeps its previous status and timestamp; memory stays ahead
    /// of the slot until the next successful sync.
    pub async fn sync_now(&self) -> Result<i64> {
        self.inner.sync_now().await
    }

    /// Queue a background sync if a baseline exists.
    ///
    /// Called at the end of every mutating operation, so the write path
    /// stays auditable. Before the first successful load or save this is a
    /// no-op. Failures inside the background task are logged and never
    /// surface to the UI.
    pub fn schedule_sync(&self) {
        if !self.inner.journal().baseline {
            debug!("auto-sync skipped; no baseline yet");
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let mut tasks = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Reap whatever already finished before queueing another task.
        while tasks.try_join_next().is_some() {}

        tasks.spawn(async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(e) = inner.sync_now().await {
                warn!(error = %e, "background sync failed");
            }
        });
    }

    /// Wait for every background sync queued so far to finish. Call at
    /// shutdown so a just-made mutation reaches the slot.
    pub async fn flush(&self) {
        let mut tasks = {
            let mut guard = self
                .inner
                .tasks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        while tasks.join_next().await.is_some() {}
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Write the current snapshot to a dated backup file in `dir` and
    /// return the path. Live state is not touched.
    pub async fn export_data(&self, dir: &Path) -> Result<PathBuf> {
        let envelope = self.inner.journal().envelope();
        self.inner.store.export_to_file(&envelope, dir).await
    }

    /// Import a backup file, replace the in-memory journal with its
    /// contents, then persist.
    ///
    /// The profile is taken only when present and non-empty, and
    /// notes/records only when the imported collection is non-empty, so a
    /// truncated backup never wipes existing data. Validation failures
    /// leave the journal untouched.
    pub async fn import_data(&self, path: &Path) -> Result<ImportSummary> {
        let envelope = self.inner.store.import_from_file(path).await?;

        let summary = {
            let mut journal = self.inner.journal();
            let mut summary = ImportSummary::default();

            if let Some(profile) = envelope.user_profile {
                if !profile.is_empty() {
                    journal.profile = profile;
                    summary.profile_replaced = true;
                }
            }
            if !envelope.tasting_notes.is_empty() {
                summary.notes_imported = envelope.tasting_notes.len();
                journal.tasting_notes = envelope.tasting_notes;
            }
            if !envelope.brewing_records.is_empty() {
                summary.records_imported = envelope.brewing_records.len();
                journal.brewing_records = envelope.brewing_records;
            }
            summary
        };

        info!(
            profile = summary.profile_replaced,
            notes = summary.notes_imported,
            records = summary.records_imported,
            "backup imported"
        );

        self.sync_now().await?;
        Ok(summary)
    }

    // ------------------------------------------------------------------
    // Read access: always copies; the journal itself never leaves the lock
    // ------------------------------------------------------------------

    pub fn profile(&self) -> UserProfile {
        self.inner.journal().profile.clone()
    }

    /// Tasting notes, newest first.
    pub fn tasting_notes(&self) -> Vec<TastingNote> {
        self.inner.journal().tasting_notes.clone()
    }

    /// Brewing records, newest first.
    pub fn brewing_records(&self) -> Vec<BrewingRecord> {
        self.inner.journal().brewing_records.clone()
    }

    pub fn status(&self) -> SyncStatus {
        self.inner.journal().status
    }

    /// Epoch milliseconds of the last successful sync, if any.
    pub fn last_sync(&self) -> Option<i64> {
        self.inner.journal().last_sync
    }

    /// Whole-area storage utilization.
    pub async fn storage_usage(&self) -> Result<StorageUsage> {
        self.inner.store.usage().await
    }

    /// Remove the durable slot only; the in-memory journal stays as-is.
    pub async fn clear_local(&self) -> Result<bool> {
        self.inner.store.clear().await
    }
}
