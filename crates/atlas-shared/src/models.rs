//! Domain model structs carried in the sync envelope.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so the JSON written here is interchangeable with the envelopes the
//! mobile app already produces (`coffee_atlas_data` slots and
//! `coffee_atlas_backup_*.json` exports).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// The local user's profile. Immutable once created except via an explicit
/// replace (import).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier for this profile.
    pub id: String,
    /// Display name shown in the journal views.
    pub nickname: String,
    /// Optional avatar image reference (URL or asset key).
    pub avatar_url: Option<String>,
    /// Calendar date the profile was created.
    pub created_at: NaiveDate,
}

impl UserProfile {
    /// A profile without an identifier counts as empty; empty profiles in
    /// imported envelopes never replace the live one.
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// TastingNote
// ---------------------------------------------------------------------------

/// A single tasting session: brewing parameters plus sensory evaluation.
///
/// Brewing parameters are stored as display strings, not normalized
/// numerics: users write "93°C" or "1:15" however their gear reads, and
/// the journal keeps it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TastingNote {
    /// Unique within the device; assigned at creation.
    pub id: String,
    /// Free-text bean name.
    pub bean_name: String,
    pub grinder: String,
    pub grind_size: String,
    pub dripper: String,
    pub water_temp: String,
    pub coffee_amount: String,
    pub ratio: String,
    /// Overall score in [0, 10], conventionally in 0.25 steps.
    pub score: f64,
    /// Free-text flavour notes.
    pub notes: String,
    /// Calendar date of the session (not a timestamp).
    pub date: NaiveDate,
    /// Optional photo reference.
    pub image_url: Option<String>,
}

/// Input for a new tasting note: everything except the generated id and
/// date, which the orchestrator assigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTastingNote {
    pub bean_name: String,
    pub grinder: String,
    pub grind_size: String,
    pub dripper: String,
    pub water_temp: String,
    pub coffee_amount: String,
    pub ratio: String,
    pub score: f64,
    pub notes: String,
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// BrewingRecord
// ---------------------------------------------------------------------------

/// A brewing session log: the same parameters as a tasting note plus an
/// optional link into the shared bean catalog and method/timing details.
/// Append-only; no delete is exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewingRecord {
    /// Unique within the device; assigned at creation.
    pub id: String,
    pub bean_name: String,
    pub grinder: String,
    pub grind_size: String,
    pub dripper: String,
    pub water_temp: String,
    pub coffee_amount: String,
    pub ratio: String,
    pub score: f64,
    pub notes: String,
    /// Calendar date of the session.
    pub date: NaiveDate,
    pub image_url: Option<String>,
    /// Identifier of a catalog bean, when the brew used one.
    pub bean_id: Option<String>,
    pub brew_method: Option<String>,
    pub brew_time: Option<String>,
}

/// Input for a new brewing record, minus the generated id and date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrewingRecord {
    pub bean_name: String,
    pub grinder: String,
    pub grind_size: String,
    pub dripper: String,
    pub water_temp: String,
    pub coffee_amount: String,
    pub ratio: String,
    pub score: f64,
    pub notes: String,
    pub image_url: Option<String>,
    pub bean_id: Option<String>,
    pub brew_method: Option<String>,
    pub brew_time: Option<String>,
}

// ---------------------------------------------------------------------------
// SyncEnvelope
// ---------------------------------------------------------------------------

/// The persisted and exported unit: the user's entire private journal plus
/// the last successful sync timestamp in epoch milliseconds.
///
/// `lastSyncTimestamp` is required; a blob without it does not
/// deserialize, which is the minimum-shape check the import path relies
/// on. The collections default to empty so older or hand-trimmed backups
/// still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncEnvelope {
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub tasting_notes: Vec<TastingNote>,
    #[serde(default)]
    pub brewing_records: Vec<BrewingRecord>,
    pub last_sync_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn envelope_round_trips_with_camel_case_fields() {
        let envelope = SyncEnvelope {
            user_profile: Some(UserProfile {
                id: "user_1".into(),
                nickname: "Coffee Explorer".into(),
                avatar_url: None,
                created_at: date(2024, 1, 1),
            }),
            tasting_notes: vec![TastingNote {
                id: "note_1".into(),
                bean_name: "Ethiopia Yirgacheffe".into(),
                grinder: "Comandante C40".into(),
                grind_size: "25 clicks".into(),
                dripper: "V60".into(),
                water_temp: "93°C".into(),
                coffee_amount: "15g".into(),
                ratio: "1:15".into(),
                score: 8.5,
                notes: "jasmine, lemon acidity".into(),
                date: date(2024, 5, 20),
                image_url: None,
            }],
            brewing_records: Vec::new(),
            last_sync_timestamp: 1_716_163_200_000,
        };

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"lastSyncTimestamp\""));
        assert!(json.contains("\"tastingNotes\""));
        assert!(json.contains("\"beanName\""));
        assert!(json.contains("\"date\":\"2024-05-20\""));

        let back: SyncEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn envelope_without_timestamp_is_rejected() {
        let json = r#"{"userProfile":null,"tastingNotes":[],"brewingRecords":[]}"#;
        assert!(serde_json::from_str::<SyncEnvelope>(json).is_err());
    }

    #[test]
    fn envelope_with_missing_collections_defaults_to_empty() {
        let json = r#"{"lastSyncTimestamp": 1716163200000}"#;
        let envelope: SyncEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.user_profile.is_none());
        assert!(envelope.tasting_notes.is_empty());
        assert!(envelope.brewing_records.is_empty());
    }

    #[test]
    fn brewing_record_keeps_catalog_link() {
        let json = r#"{
            "id": "rec_1",
            "beanName": "Colombia Huila",
            "grinder": "1Zpresso JX-Pro",
            "grindSize": "3.5",
            "dripper": "Orea",
            "waterTemp": "92°C",
            "coffeeAmount": "18g",
            "ratio": "1:16",
            "score": 9.0,
            "notes": "chocolate, nutty finish",
            "date": "2024-05-18",
            "beanId": "bean_42",
            "brewMethod": "pour over",
            "brewTime": "2:45"
        }"#;
        let record: BrewingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.bean_id.as_deref(), Some("bean_42"));
        assert_eq!(record.brew_time.as_deref(), Some("2:45"));
        assert!(record.image_url.is_none());
    }

    #[test]
    fn profile_without_id_is_empty() {
        let profile = UserProfile {
            id: "  ".into(),
            nickname: "anyone".into(),
            avatar_url: None,
            created_at: date(2024, 1, 1),
        };
        assert!(profile.is_empty());
    }
}
