//! Adventure story and progress wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single narrative step. The server stores steps as free-form objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryStep(pub Map<String, Value>);

impl StoryStep {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }
}

/// Progress save body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSubmit {
    pub character_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventure_id: Option<Uuid>,
    pub current_step: u32,
    pub choices: Vec<u32>,
}

/// Result of saving progress, including any rewards granted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProgressResponse {
    pub character_id: Uuid,
    pub current_step: u32,
    pub experience: i64,
    #[serde(default)]
    pub rewards: Vec<Value>,
}
