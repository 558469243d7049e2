// API client module: a small blocking HTTP client for the Firebase
// Realtime Database REST interface. Only two calls are needed: read the
// whole `users` collection and replace one user.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::model::UserPayload;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// The two operations the status tool needs from the remote store.
///
/// `ApiClient` talks HTTP; tests plug in an in-memory implementation.
pub trait UserStore {
    /// Read the raw `users` collection. `None` when the store has none.
    fn get_users(&self) -> Result<Option<Value>, StoreError>;

    /// Replace the user stored under `id` with `payload`.
    fn put_user(&self, id: &Uuid, payload: &UserPayload) -> Result<(), StoreError>;
}

/// Blocking reqwest client bound to one database.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: StoreConfig,
}

impl ApiClient {
    /// Build a client for the given store configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(ApiClient { client, config })
    }
}

impl UserStore for ApiClient {
    fn get_users(&self) -> Result<Option<Value>, StoreError> {
        let url = self.config.users_url();
        debug!(%url, "GET users");
        let res = self.client.get(&url).send()?;
        let status = res.status();
        let body = res.text()?;
        check_status(status, &body)?;
        parse_document(&body)
    }

    fn put_user(&self, id: &Uuid, payload: &UserPayload) -> Result<(), StoreError> {
        let url = self.config.user_url(id);
        debug!(%url, "PUT user");
        let res = self.client.put(&url).json(payload).send()?;
        let status = res.status();
        if !status.is_success() {
            let txt = res.text().unwrap_or_default();
            return check_status(status, &txt);
        }
        Ok(())
    }
}

/// Map a response status to success or [`StoreError::Status`].
pub fn check_status(status: StatusCode, body: &str) -> Result<(), StoreError> {
    if status.is_success() {
        return Ok(());
    }
    Err(StoreError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

/// Parse a response body. The database answers `null` (or nothing at all)
/// for a path that holds no data.
pub fn parse_document(body: &str) -> Result<Option<Value>, StoreError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(body)? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}
