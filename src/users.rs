//! Fetching the roster and writing one user's status back.

use crate::api::UserStore;
use crate::error::StoreError;
use crate::model::{RawUser, RejectReason, UserPayload, UserRecord};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Outcome of reading the `users` collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    /// Valid records in response order.
    pub users: Vec<UserRecord>,
    /// Entries that were dropped because they failed validation.
    pub skipped: usize,
}

/// New values for one user. See [`build_payload`] for how each field is
/// resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusUpdate {
    pub status: Option<String>,
    pub custom_status: Option<String>,
}

/// Read every user from the store.
///
/// Only a failed request or an unparseable body is an error. Malformed
/// entries are skipped and counted; an absent collection is an empty report.
pub fn fetch_all(store: &impl UserStore) -> Result<FetchReport, StoreError> {
    let report = match store.get_users()? {
        Some(document) => decode_collection(document),
        None => FetchReport::default(),
    };
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "dropped malformed user entries");
    }
    info!(users = report.users.len(), "fetched users");
    Ok(report)
}

/// Validate every entry of a `users` document.
///
/// Keyed objects are the usual shape. The database renders collections
/// with integer-like keys as arrays, with `null` in the gaps.
pub fn decode_collection(document: Value) -> FetchReport {
    let entries: Vec<(String, Value)> = match document {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            warn!(kind = json_kind(&other), "users collection is neither an object nor an array");
            return FetchReport::default();
        }
    };

    let mut report = FetchReport::default();
    for (key, value) in entries {
        match decode_entry(value) {
            Ok(user) => report.users.push(user),
            Err(reason) => {
                debug!(%key, %reason, "skipping user entry");
                report.skipped += 1;
            }
        }
    }
    report
}

fn decode_entry(value: Value) -> Result<UserRecord, RejectReason> {
    let raw: RawUser = serde_json::from_value(value).map_err(|_| RejectReason::MalformedEntry)?;
    UserRecord::try_from(raw)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the replacement body for `record`.
///
/// `status` falls back to the current value. `customStatus` does not: a
/// missing value clears it in the store, so re-saving a user without a
/// custom status erases the previous one.
pub fn build_payload(record: &UserRecord, update: StatusUpdate) -> UserPayload {
    UserPayload {
        id: record.id,
        name: record.name.clone(),
        email: record.email.clone(),
        username: record.username.clone(),
        status: update.status.unwrap_or_else(|| record.status.clone()),
        custom_status: update.custom_status,
    }
}

/// Overwrite `record` in the store and return what was written.
pub fn update(
    store: &impl UserStore,
    record: &UserRecord,
    update: StatusUpdate,
) -> Result<UserPayload, StoreError> {
    let payload = build_payload(record, update);
    store.put_user(&record.id, &payload)?;
    info!(id = %record.id, status = %payload.status, cleared = payload.custom_status.is_none(), "user updated");
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    const ANN: &str = "0b6f8f5e-4b1e-4a4e-9d55-3c8a2f1e7b10";
    const BOB: &str = "9a1c3d7e-2f4b-4c8d-8e6f-1a2b3c4d5e6f";

    fn ann() -> UserRecord {
        UserRecord {
            id: Uuid::parse_str(ANN).unwrap(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            username: "ann".into(),
            status: "online".into(),
            custom_status: Some("coffee".into()),
        }
    }

    #[test]
    fn object_entries_keep_response_order() {
        let report = decode_collection(json!({
            "z": {"id": BOB, "name": "Bob", "email": "bob@x.com"},
            "a": {"id": ANN, "name": "Ann", "email": "ann@x.com"}
        }));
        let names: Vec<_> = report.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Ann"]);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn bad_entries_are_skipped_wherever_they_sit() {
        for bad_position in 0..3 {
            let mut entries = vec![
                json!({"id": ANN, "name": "Ann", "email": "ann@x.com"}),
                json!({"id": BOB, "name": "Bob", "email": "bob@x.com"}),
            ];
            entries.insert(bad_position, json!({"id": "nope", "name": "Bad", "email": "b@x.com"}));
            let mut map = serde_json::Map::new();
            for (i, entry) in entries.into_iter().enumerate() {
                map.insert(format!("k{i}"), entry);
            }
            let report = decode_collection(Value::Object(map));
            let names: Vec<_> = report.users.iter().map(|u| u.name.as_str()).collect();
            assert_eq!(names, ["Ann", "Bob"], "bad entry at {bad_position}");
            assert_eq!(report.skipped, 1);
        }
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let report = decode_collection(json!({
            "a": "just a string",
            "b": {"id": ANN, "name": 42, "email": "ann@x.com"},
            "c": {"id": ANN, "name": "Ann", "email": "ann@x.com"}
        }));
        assert_eq!(report.users.len(), 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn odd_optional_field_types_do_not_drop_records() {
        let report = decode_collection(json!({
            "a": {"id": ANN, "name": "Ann", "email": "ann@x.com", "status": 3},
            "b": {"id": BOB, "name": "Bob", "email": "bob@x.com", "customStatus": {"t": 1}},
            "c": {"id": ANN, "name": "Cid", "email": "cid@x.com", "username": 7}
        }));
        assert_eq!(report.users.len(), 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.users[0].status, "3");
        assert_eq!(report.users[2].username, "7");
    }

    #[test]
    fn array_collections_skip_holes() {
        let report = decode_collection(json!([
            null,
            {"id": ANN, "name": "Ann", "email": "ann@x.com"}
        ]));
        assert_eq!(report.users.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn scalar_collection_yields_nothing() {
        assert_eq!(decode_collection(json!(7)), FetchReport::default());
    }

    #[test]
    fn status_falls_back_to_current_value() {
        let payload = build_payload(&ann(), StatusUpdate::default());
        assert_eq!(payload.status, "online");
    }

    #[test]
    fn missing_custom_status_clears_the_old_one() {
        let payload = build_payload(
            &ann(),
            StatusUpdate { status: Some("working".into()), custom_status: None },
        );
        assert_eq!(payload.status, "working");
        assert_eq!(payload.custom_status, None);
    }

    #[test]
    fn identity_fields_are_copied() {
        let record = ann();
        let payload = build_payload(
            &record,
            StatusUpdate { status: None, custom_status: Some("in a meeting".into()) },
        );
        assert_eq!(payload.id, record.id);
        assert_eq!(payload.name, record.name);
        assert_eq!(payload.email, record.email);
        assert_eq!(payload.username, record.username);
        assert_eq!(payload.custom_status.as_deref(), Some("in a meeting"));
    }
}
