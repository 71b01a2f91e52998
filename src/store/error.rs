//! Structured operation failures.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::client::ClientError;

/// Message used when neither the transport nor the operation supplies one.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Which operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FetchError,
    CreateError,
    UpdateError,
    DeleteError,
    /// Failure of a resource-specific extension, by action name.
    Extension(String),
}

impl ErrorKind {
    /// Name as exposed to callers, e.g. `FetchError` or `MarkAsReadError`.
    pub fn name(&self) -> String {
        match self {
            ErrorKind::FetchError => "FetchError".to_string(),
            ErrorKind::CreateError => "CreateError".to_string(),
            ErrorKind::UpdateError => "UpdateError".to_string(),
            ErrorKind::DeleteError => "DeleteError".to_string(),
            ErrorKind::Extension(action) => {
                let mut chars = action.chars();
                match chars.next() {
                    Some(first) => format!("{}{}Error", first.to_uppercase(), chars.as_str()),
                    None => "ExtensionError".to_string(),
                }
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// A `{name, message}` failure of one store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct StoreError {
    #[serde(rename = "name")]
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Wrap a transport failure.
    ///
    /// The message is taken from `err` when it has one, else `fallback`,
    /// else [`UNKNOWN_ERROR`].
    pub fn from_client(kind: ErrorKind, err: &ClientError, fallback: Option<&str>) -> Self {
        let message = err
            .message()
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Self { kind, message }
    }

    pub fn name(&self) -> String {
        self.kind.name()
    }
}
