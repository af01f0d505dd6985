//! Frontend Models
//!
//! Data structures matching the backend's REST payloads. Wire names are the
//! backend's (Slovene) field names; Rust fields use English names.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Older clients stored the project id as a number, or as `null` when it
/// did not parse. Any of string, number or null is accepted.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    })
}

/// Inspection type (backend `Tip`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionType {
    pub id: u32,
    #[serde(rename = "naziv")]
    pub name: String,
}

/// (type, repeat count) association of a project (backend `ProjektTip`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "tip")]
    pub type_id: u32,
    #[serde(rename = "stevilo_ponovitev")]
    pub repeat_count: u32,
}

/// Project data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// User-assigned identifier
    pub id: String,
    #[serde(rename = "osebna_stevilka")]
    pub owner: String,
    #[serde(rename = "datum")]
    pub date: NaiveDate,
    #[serde(rename = "projekt_tipi", default)]
    pub project_types: Vec<ProjectType>,
}

impl Project {
    /// Association for the given type, if the project carries one
    pub fn association(&self, type_id: u32) -> Option<&ProjectType> {
        self.project_types.iter().find(|pt| pt.type_id == type_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "vprasanje")]
    pub text: String,
    /// Answer kind tag
    #[serde(rename = "tip")]
    pub kind: String,
    #[serde(rename = "segment")]
    pub segment_id: u32,
    #[serde(default)]
    pub repeatability: bool,
    #[serde(rename = "obvezno", default)]
    pub mandatory: bool,
    /// Options for choice-type questions
    #[serde(rename = "moznosti", default)]
    pub options: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "tip")]
    pub type_id: u32,
    #[serde(rename = "ime", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "vprasanja", default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

/// One repetition of a type within a project; answers are keyed by `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialNumber {
    pub id: u32,
    #[serde(rename = "projekt")]
    pub project_id: String,
    /// `{projectId}-{typeId}-{n}`
    #[serde(rename = "stevilka")]
    pub value: String,
    #[serde(rename = "tip", default)]
    pub type_id: Option<u32>,
    #[serde(rename = "projekt_tip", default)]
    pub project_type_id: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Recorded value for a (question, serial number) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "vprasanje_id")]
    pub question_id: u32,
    #[serde(rename = "odgovor")]
    pub value: String,
    /// Empty when the stored row carried no usable id
    #[serde(rename = "projekt_id", default, deserialize_with = "lenient_id")]
    pub project_id: String,
    /// Serial number string, not its id
    #[serde(rename = "serijska_stevilka")]
    pub serial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Answer {
    pub fn new(question_id: u32, value: impl Into<String>, project_id: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            id: None,
            question_id,
            value: value.into(),
            project_id: project_id.into(),
            serial: serial.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

// ========================
// Settings, profiles, users
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub format: String,
    #[serde(rename = "lokacija")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    #[serde(rename = "jezik")]
    pub language: String,
    #[serde(rename = "tema")]
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Partial profile update; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Partial user update sent with PATCH
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
}

/// Logged-in user as returned by `/auth/user/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u32,
    #[serde(rename = "osebna_stevilka")]
    pub personal_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Registration payload
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    #[serde(rename = "osebna_stevilka")]
    pub personal_number: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
