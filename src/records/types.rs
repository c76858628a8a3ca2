//! Record shapes for the document collections.
//!
//! Each collection the application stores has a strongly typed shape with
//! per-field defaults. [`RecordKind`] is the registry that maps a
//! collection name to its validator, so the store can check incoming JSON
//! without runtime reflection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Errors from record validation.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Collection name is not registered.
    #[error("unknown collection: {0}")]
    UnknownKind(String),

    /// Body does not deserialize into the collection's shape.
    #[error("invalid document: {0}")]
    Shape(String),

    /// Body deserialized but failed field validation.
    #[error("validation failed: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// The document collections known to the store.
///
/// Collection names are the lowercased type names, matching what clients
/// see in `/schema`. The `user` collection is not listed here: credential
/// records live in the account directory, not the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Article,
    Indicator,
    Message,
    LibraryItem,
    CalendarEvent,
    Earning,
    SupportTicket,
}

impl RecordKind {
    /// All registered kinds, in schema order.
    pub const ALL: &'static [RecordKind] = &[
        RecordKind::Article,
        RecordKind::Indicator,
        RecordKind::Message,
        RecordKind::LibraryItem,
        RecordKind::CalendarEvent,
        RecordKind::Earning,
        RecordKind::SupportTicket,
    ];

    /// Collection name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Article => "article",
            RecordKind::Indicator => "indicator",
            RecordKind::Message => "message",
            RecordKind::LibraryItem => "libraryitem",
            RecordKind::CalendarEvent => "calendarevent",
            RecordKind::Earning => "earning",
            RecordKind::SupportTicket => "supportticket",
        }
    }

    /// Validate a JSON body against this kind's shape.
    ///
    /// On success the canonical form is returned: defaults filled in,
    /// unknown top-level fields dropped.
    pub fn validate_body(&self, body: &Value) -> Result<Value, RecordError> {
        match self {
            RecordKind::Article => check::<Article>(body),
            RecordKind::Indicator => check::<Indicator>(body),
            RecordKind::Message => check::<Message>(body),
            RecordKind::LibraryItem => check::<LibraryItem>(body),
            RecordKind::CalendarEvent => check::<CalendarEvent>(body),
            RecordKind::Earning => check::<Earning>(body),
            RecordKind::SupportTicket => check::<SupportTicket>(body),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RecordError::UnknownKind(s.to_string()))
    }
}

/// Every collection name exposed by `/schema`, including the account
/// directory's `user` collection.
pub fn collection_names() -> Vec<String> {
    let mut names = vec!["user".to_string()];
    names.extend(RecordKind::ALL.iter().map(|k| k.as_str().to_string()));
    names
}

fn check<T>(body: &Value) -> Result<Value, RecordError>
where
    T: DeserializeOwned + Serialize + Validate,
{
    let record: T =
        serde_json::from_value(body.clone()).map_err(|e| RecordError::Shape(e.to_string()))?;
    record.validate()?;
    serde_json::to_value(record).map_err(|e| RecordError::Shape(e.to_string()))
}

/// News or analysis article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Article {
    #[validate(length(min = 1))]
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Trading indicator with free-form settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Indicator {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub settings: serde_json::Map<String, Value>,
}

/// Chat message posted to a room.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Message {
    #[validate(length(min = 1))]
    pub user: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(default = "default_room")]
    pub room: String,
}

fn default_room() -> String {
    "general".to_string()
}

/// Library resource: ebook, pdf, video, course or link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LibraryItem {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub item_type: String,
    #[validate(url)]
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Calendar event, typically an economic release.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalendarEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub source: Option<String>,
}

/// Earnings report entry for a ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Earning {
    #[validate(length(min = 1))]
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub est_eps: Option<f64>,
    pub act_eps: Option<f64>,
}

/// Support ticket raised by a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SupportTicket {
    #[validate(length(min = 1))]
    pub user: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(default = "default_ticket_status")]
    pub status: String,
}

fn default_ticket_status() -> String {
    "open".to_string()
}
