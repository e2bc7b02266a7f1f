//! Shared-catalog reference entities.
//!
//! These rows come straight from the managed table store; camelCase field
//! names match the JSON the store serves.

use serde::{Deserialize, Serialize};

/// Roast level of a catalog bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
}

/// A coffee roaster in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Roaster {
    pub id: String,
    pub name: String,
    /// Logo image reference; empty when the roaster has none.
    pub logo: String,
    pub location: String,
    pub description: String,
    pub founded_year: Option<i32>,
    pub social_media: String,
}

/// A coffee bean in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeBean {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub roast_level: RoastLevel,
    pub process: String,
    /// Community rating, 0–5.
    pub rating: f64,
    pub image: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bean_deserializes_from_catalog_row() {
        let json = r#"{
            "id": "bean_42",
            "name": "Yirgacheffe Washed",
            "origin": "Ethiopia",
            "roastLevel": "Light",
            "process": "Washed",
            "rating": 4.6,
            "image": "https://example.com/bean.jpg",
            "description": "Floral and citric"
        }"#;
        let bean: CoffeeBean = serde_json::from_str(json).unwrap();
        assert_eq!(bean.roast_level, RoastLevel::Light);
        assert_eq!(bean.origin, "Ethiopia");
    }

    #[test]
    fn roaster_tolerates_missing_founded_year() {
        let json = r#"{
            "id": "r-1",
            "name": "Example Roastery",
            "logo": "",
            "location": "Shanghai",
            "description": "Specialty roaster",
            "socialMedia": "@example"
        }"#;
        let roaster: Roaster = serde_json::from_str(json).unwrap();
        assert!(roaster.founded_year.is_none());
    }
}
