//! Remote-call error taxonomy.
//!
//! Every collaborator call (save, delete, fetch) fails with a [`RemoteError`].
//! Only the [`RemoteError::Http`] variant carries field-level validation
//! detail; everything else is a transport or unexpected failure and must not
//! be rendered as per-field alerts.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Field-keyed validation messages: field name (or a single sentinel key)
/// mapped to a message code.
pub type Alerts = BTreeMap<String, String>;

/// Builds an alert map holding a single key.
pub fn single_alert(key: impl Into<String>, code: impl Into<String>) -> Alerts {
    let mut alerts = Alerts::new();
    alerts.insert(key.into(), code.into());
    alerts
}

type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The server rejected a request with field-level validation detail.
#[derive(Debug, Clone)]
pub struct HttpError {
    data: Alerts,
    created_at: DateTime<Utc>,
    cause: Option<Cause>,
}

impl HttpError {
    /// Creates an error carrying the given field → code payload.
    pub fn new(data: Alerts) -> Self {
        Self {
            data,
            created_at: Utc::now(),
            cause: None,
        }
    }

    /// Creates an error and preserves the native failure that produced it.
    pub fn with_cause<E>(data: Alerts, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            data,
            created_at: Utc::now(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Builds an error from a JSON response body of the form
    /// `{"field": "code", ...}`. Non-string codes are kept in their JSON
    /// text form.
    pub fn from_json(body: &serde_json::Value) -> crate::Result<Self> {
        let object = body.as_object().ok_or_else(|| {
            crate::Error::InvalidPayload(format!("expected a JSON object, got {body}"))
        })?;

        let data = object
            .iter()
            .map(|(field, code)| {
                let code = match code {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), code)
            })
            .collect();

        Ok(Self::new(data))
    }

    /// The field → code payload.
    pub fn data(&self) -> &Alerts {
        &self.data
    }

    /// Consumes the error, returning its payload.
    pub fn into_data(self) -> Alerts {
        self.data
    }

    /// When the error was constructed. Never changes afterwards.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The preserved native cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Whether the preserved cause is a connection abort, reset or timeout.
    pub fn is_connection_abort(&self) -> bool {
        self.cause()
            .and_then(|c| c.downcast_ref::<io::Error>())
            .is_some_and(|e| {
                matches!(
                    e.kind(),
                    io::ErrorKind::ConnectionAborted
                        | io::ErrorKind::ConnectionReset
                        | io::ErrorKind::TimedOut
                )
            })
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request rejected")?;
        let mut sep = ": ";
        for (field, code) in &self.data {
            write!(f, "{sep}{field}={code}")?;
            sep = ", ";
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

/// Result type for collaborator calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure of a remote save, delete or fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// Validation or business rejection with field-level detail.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Any other failure (network, serialization, server crash...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The call observed its cancellation context and gave up.
    #[error("request cancelled")]
    Cancelled,
}

impl RemoteError {
    /// Wraps any displayable failure as a transport error.
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Returns the validation error when this is one.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<io::Error> for RemoteError {
    fn from(e: io::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
