//! Personality quiz wire types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One answer option of a quiz question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityOption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub value: i32,
    /// Stat name -> points granted
    #[serde(default)]
    pub effect: HashMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl PersonalityOption {
    /// The stat this option boosts the most, if any.
    pub fn main_effect(&self) -> Option<&str> {
        self.effect
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(stat, _)| stat.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<PersonalityOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Quiz submission body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTestSubmit {
    pub user_id: Uuid,
    pub answers: Vec<i32>,
}

/// Stats computed from quiz answers. Unlike `CharacterStats` these are snake_case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityStats {
    pub quantum_charisma: i32,
    pub absurdity_resistance: i32,
    pub sarcasm_level: i32,
    pub time_warping: i32,
    pub cosmic_luck: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTestResults {
    pub stats: PersonalityStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_effect_picks_highest_bonus() {
        let option = PersonalityOption {
            text: "Juggle black holes".into(),
            emoji: None,
            value: 3,
            effect: HashMap::from([
                ("cosmic_luck".to_string(), 2),
                ("time_warping".to_string(), 5),
            ]),
            feedback: None,
        };

        assert_eq!(option.main_effect(), Some("time_warping"));
    }

    #[test]
    fn main_effect_empty() {
        let option = PersonalityOption {
            text: "Do nothing".into(),
            emoji: None,
            value: 0,
            effect: HashMap::new(),
            feedback: None,
        };

        assert_eq!(option.main_effect(), None);
    }
}
