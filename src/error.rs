//! Error types for talking to the remote user store.

use thiserror::Error;

/// Errors raised by the store client and the fetch/update flow.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store location or another setting is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("request to the user store failed")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status code.
    #[error("user store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not a JSON document.
    #[error("user store response is not valid JSON")]
    Decode(#[from] serde_json::Error),
}

/// Operator input that cannot select a record. Fatal, never re-prompted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("selection {selected} is out of range (1..={len})")]
    OutOfRange { selected: usize, len: usize },
}
