//! Built-in demonstration dataset for a fresh install.
//!
//! When no prior envelope exists the orchestrator hydrates from these
//! values so the journal views have something to show before the user has
//! logged anything. Seed data is never persisted until a first sync
//! establishes a baseline.

use chrono::NaiveDate;

use crate::models::{TastingNote, UserProfile};

/// Default profile for a fresh install.
pub fn default_profile() -> UserProfile {
    UserProfile {
        id: "user_1".to_string(),
        nickname: "Coffee Explorer".to_string(),
        avatar_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=coffee".to_string()),
        created_at: seed_date(2024, 1, 1),
    }
}

/// The three demonstration tasting notes shown on first launch.
pub fn seed_tasting_notes() -> Vec<TastingNote> {
    vec![
        TastingNote {
            id: "note_1".to_string(),
            bean_name: "Ethiopia Yirgacheffe".to_string(),
            grinder: "Comandante C40".to_string(),
            grind_size: "25 clicks".to_string(),
            dripper: "V60".to_string(),
            water_temp: "93°C".to_string(),
            coffee_amount: "15g".to_string(),
            ratio: "1:15".to_string(),
            score: 8.5,
            notes: "Pronounced jasmine, crisp lemon acidity, very clean cup".to_string(),
            date: seed_date(2024, 5, 20),
            image_url: Some("https://picsum.photos/seed/coffee_n1/200/200".to_string()),
        },
        TastingNote {
            id: "note_2".to_string(),
            bean_name: "Colombia Huila".to_string(),
            grinder: "1Zpresso JX-Pro".to_string(),
            grind_size: "3.5".to_string(),
            dripper: "Orea".to_string(),
            water_temp: "92°C".to_string(),
            coffee_amount: "18g".to_string(),
            ratio: "1:16".to_string(),
            score: 9.0,
            notes: "Chocolate forward, nutty finish, solid body".to_string(),
            date: seed_date(2024, 5, 18),
            image_url: Some("https://picsum.photos/seed/coffee_n2/200/200".to_string()),
        },
        TastingNote {
            id: "note_3".to_string(),
            bean_name: "Panama Geisha".to_string(),
            grinder: "Timemore C3".to_string(),
            grind_size: "15 clicks".to_string(),
            dripper: "Solo".to_string(),
            water_temp: "94°C".to_string(),
            coffee_amount: "20g".to_string(),
            ratio: "1:14".to_string(),
            score: 7.75,
            notes: "Explosive florals, peach sweetness, textbook geisha".to_string(),
            date: seed_date(2024, 5, 15),
            image_url: Some("https://picsum.photos/seed/coffee_n3/200/200".to_string()),
        },
    ]
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal seed dates, always valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
