//! Boundary types for the downstream memory store.
//!
//! The store's `add` operation receives one user-role message holding the
//! normalized text, plus metadata that keeps the original wording. Its
//! extraction stage answers with a strict `{"facts": [...]}` object; it is
//! told never to convert relative dates itself, which is why the message
//! content must already carry absolute ones.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, VnDatesError};
use crate::normalizer::Normalizer;

/// An incoming "remember this message" request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddMemoryRequest {
    pub user_id: String,
    pub group_id: String,
    #[serde(default)]
    pub workspace_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    /// Source platform, e.g. `telegram`, `lark`, `web`.
    #[serde(default)]
    pub platform: Option<String>,
    /// ISO 8601 send time of the message.
    #[serde(default)]
    pub sent_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMetadata {
    pub sender_name: Option<String>,
    pub group_name: Option<String>,
    pub platform: Option<String>,
    /// The request's `sent_at`, or the reference instant actually used.
    pub sent_at: String,
    pub original_message: String,
    pub workspace_id: Option<String>,
    pub group_id: String,
}

/// What is handed to the memory store's `add` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryAddPayload {
    pub messages: Vec<MemoryMessage>,
    pub user_id: String,
    pub metadata: MemoryMetadata,
}

/// Normalize the request's message and wrap it for the memory store.
///
/// A missing or blank `sent_at` is replaced in the metadata by the reference
/// instant the message was actually resolved against.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vn_dates::{prepare_add, AddMemoryRequest, FixedClock, Normalizer};
///
/// let request: AddMemoryRequest = serde_json::from_str(concat!(
///     r#"{"user_id":"u-1","group_id":"g-1","message":"Ngày mai 10h họp","#,
///     r#""sent_at":"2025-01-01T08:00:00Z"}"#,
/// ))
/// .unwrap();
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
/// let payload = prepare_add(&Normalizer::new().unwrap(), &request, &clock);
///
/// assert_eq!(payload.messages[0].content, "ngày 02/01/2025 10h họp");
/// assert_eq!(payload.metadata.original_message, "Ngày mai 10h họp");
/// ```
pub fn prepare_add(
    normalizer: &Normalizer,
    request: &AddMemoryRequest,
    clock: &dyn Clock,
) -> MemoryAddPayload {
    let reference = normalizer.reference(request.sent_at.as_deref(), clock);
    let content = normalizer.normalize(&request.message, &reference);

    MemoryAddPayload {
        messages: vec![MemoryMessage {
            role: Role::User,
            content,
        }],
        user_id: request.user_id.clone(),
        metadata: MemoryMetadata {
            sender_name: request.sender_name.clone(),
            group_name: request.group_name.clone(),
            platform: request.platform.clone(),
            sent_at: request
                .sent_at
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| reference.to_iso_string(), String::from),
            original_message: request.message.clone(),
            workspace_id: request.workspace_id.clone(),
            group_id: request.group_id.clone(),
        },
    }
}

/// The extraction stage's answer: short, self-contained facts in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractedFacts {
    pub facts: Vec<String>,
}

impl ExtractedFacts {
    /// Parse the strict `{"facts": [...]}` object.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidFacts`] for any other shape.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw.trim()).map_err(|e| VnDatesError::InvalidFacts(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
