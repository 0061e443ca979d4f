//! Core type definitions for Mainstay.
//!
//! This crate defines the small, domain-agnostic types shared by the entity
//! model, the edit orchestration and the fetch layer:
//! - Record identifiers ([`UiId`] client-side, [`ServerId`] server-side)
//! - The remote error taxonomy ([`HttpError`], [`RemoteError`])
//! - Field-keyed validation alerts ([`Alerts`])

mod error;
mod ids;

pub use error::{single_alert, Alerts, HttpError, RemoteError, RemoteResult};
pub use ids::{ServerId, UiId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
