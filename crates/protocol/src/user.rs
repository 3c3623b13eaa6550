//! User and authentication wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// User profile as returned by `/api/users/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Optional fields, omitted from serialized output when unset
    pub const OPTIONAL_FIELDS: [&'static str; 2] = ["image_url", "provider"];

    /// Every field as a JSON object, unset optional fields as `null`
    pub fn to_record(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut record = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for field in Self::OPTIONAL_FIELDS {
            record.entry(field).or_insert(Value::Null);
        }
        Ok(record)
    }
}

/// User profile plus the bearer token issued by register/login endpoints.
///
/// This is also the shape persisted locally as the stored user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl UserWithToken {
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Password login credentials.
///
/// The server follows the OAuth2 password form, so the email travels as `username`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: email.into(),
            password: password.into(),
        }
    }

    /// Form fields in the order the server documents them
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

/// Social provider login payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLoginData {
    pub provider: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
