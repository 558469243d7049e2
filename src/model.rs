//! User records as stored in the Realtime Database.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status written for records that carry none.
pub const DEFAULT_STATUS: &str = "online";

/// Presence values the mobile app understands.
///
/// The store itself accepts any string; this list only drives prompt hints
/// and a warning for unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Offline,
    Working,
    Studying,
}

impl PresenceStatus {
    pub const ALL: [PresenceStatus; 4] = [
        PresenceStatus::Online,
        PresenceStatus::Offline,
        PresenceStatus::Working,
        PresenceStatus::Studying,
    ];

    /// Value as written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Offline => "offline",
            PresenceStatus::Working => "working",
            PresenceStatus::Studying => "studying",
        }
    }

    /// `online/offline/working/studying`, for prompts.
    pub fn hint() -> String {
        Self::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("/")
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown presence status '{s}'"))
    }
}

/// One entry of the `users` collection exactly as it arrives, before any
/// validation. Unknown keys (e.g. `friendsList`) are ignored.
///
/// Only `id`, `name` and `email` must be strings. The optional fields take
/// whatever JSON they hold, rendered as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "any_as_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "any_as_text")]
    pub status: Option<String>,
    #[serde(default, rename = "customStatus", deserialize_with = "any_as_text")]
    pub custom_status: Option<String>,
}

/// `null` is absent, strings are taken as-is, anything else becomes its
/// JSON text (`3`, `true`, `{"t":1}`).
fn any_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Why a raw entry was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Not an object, or a required field is not a string.
    MalformedEntry,
    MissingField(&'static str),
    InvalidId(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MalformedEntry => f.write_str("entry is not a user object with string id, name and email"),
            RejectReason::MissingField(field) => write!(f, "missing required field '{field}'"),
            RejectReason::InvalidId(id) => write!(f, "'{id}' is not a valid UUID"),
        }
    }
}

/// A validated user record.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Empty when the store has none.
    pub username: String,
    /// Any string; [`DEFAULT_STATUS`] when the store has none.
    pub status: String,
    /// `None` is distinct from an empty string.
    pub custom_status: Option<String>,
}

impl UserRecord {
    /// What the app shows next to the user: the custom status when it has
    /// visible text, otherwise the presence status.
    pub fn display_status(&self) -> &str {
        match self.custom_status.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => custom,
            _ => &self.status,
        }
    }

    /// The presence status, if it is one the app knows.
    pub fn presence(&self) -> Option<PresenceStatus> {
        self.status.parse().ok()
    }
}

impl From<UserPayload> for UserRecord {
    fn from(payload: UserPayload) -> Self {
        UserRecord {
            id: payload.id,
            name: payload.name,
            email: payload.email,
            username: payload.username,
            status: payload.status,
            custom_status: payload.custom_status,
        }
    }
}

impl TryFrom<RawUser> for UserRecord {
    type Error = RejectReason;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(RejectReason::MissingField("id"))?;
        let id = Uuid::parse_str(&id).map_err(|_| RejectReason::InvalidId(id))?;
        let name = raw.name.ok_or(RejectReason::MissingField("name"))?;
        let email = raw.email.ok_or(RejectReason::MissingField("email"))?;
        Ok(UserRecord {
            id,
            name,
            email,
            username: raw.username.unwrap_or_default(),
            status: raw.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            custom_status: raw.custom_status,
        })
    }
}

/// Body of the replacement write for one user.
///
/// `customStatus` is always present on the wire, as `null` when cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    pub status: String,
    #[serde(rename = "customStatus")]
    pub custom_status: Option<String>,
}
