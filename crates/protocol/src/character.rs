//! Character wire types and stat helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every 10 stat points make one level.
pub const POINTS_PER_LEVEL: i32 = 10;

/// The five character stats. The API keeps these in camelCase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterStats {
    pub quantum_charisma: i32,
    pub absurdity_resistance: i32,
    pub sarcasm_level: i32,
    pub time_warping: i32,
    pub cosmic_luck: i32,
}

/// Level reached by a stat value.
pub fn stat_level(points: i32) -> i32 {
    points.max(0) / POINTS_PER_LEVEL
}

/// Fraction of the way to the next level, in `[0.0, 1.0)`.
pub fn stat_progress(points: i32) -> f32 {
    (points.max(0) % POINTS_PER_LEVEL) as f32 / POINTS_PER_LEVEL as f32
}

/// A user-owned character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub character_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stats: CharacterStats,
    pub user_id: Uuid,
    #[serde(default)]
    pub experience: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Equipped artifacts; the server sends loosely-typed records here
    #[serde(default)]
    pub artifacts: Vec<serde_json::Value>,
}

/// Character creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterCreate {
    pub name: String,
    pub character_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stats: CharacterStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Partial character update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CharacterStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_use_camel_case() {
        let stats = CharacterStats {
            quantum_charisma: 50,
            absurdity_resistance: 40,
            sarcasm_level: 70,
            time_warping: 30,
            cosmic_luck: 60,
        };

        let value = serde_json::to_value(stats).expect("serializable");

        assert_eq!(
            value,
            json!({
                "quantumCharisma": 50,
                "absurdityResistance": 40,
                "sarcasmLevel": 70,
                "timeWarping": 30,
                "cosmicLuck": 60
            })
        );
    }

    #[test]
    fn missing_stats_default_to_zero() {
        let stats: CharacterStats =
            serde_json::from_value(json!({ "sarcasmLevel": 92 })).expect("partial stats");
        assert_eq!(stats.sarcasm_level, 92);
        assert_eq!(stats.cosmic_luck, 0);
    }

    #[test]
    fn stat_levels() {
        assert_eq!(stat_level(0), 0);
        assert_eq!(stat_level(9), 0);
        assert_eq!(stat_level(10), 1);
        assert_eq!(stat_level(92), 9);
        assert_eq!(stat_level(-5), 0);
    }

    #[test]
    fn stat_progress_is_fraction_of_level() {
        assert!((stat_progress(85) - 0.5).abs() < f32::EPSILON);
        assert_eq!(stat_progress(70), 0.0);
    }

    #[test]
    fn character_parses_server_payload() {
        let character: Character = serde_json::from_value(json!({
            "id": "123e4567-e89b-12d3-a456-426614174001",
            "name": "Zortblob",
            "character_class": "Quantum Waiter",
            "stats": { "quantumCharisma": 85 },
            "user_id": "123e4567-e89b-12d3-a456-426614174000",
            "experience": 100,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .expect("valid character");

        assert_eq!(character.stats.quantum_charisma, 85);
        assert!(character.artifacts.is_empty());
        assert_eq!(character.image_url, None);
    }
}
