//! Error types for the entity model.

use crate::RecordKind;
use mainstay_types::{RemoteError, UiId};
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while mutating the entity tree.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The parent a record must attach to is not in the tree.
    #[error("parent {kind} not found: {id}")]
    ParentNotFound { kind: RecordKind, id: UiId },

    /// No record of this kind with this id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: UiId },

    /// A record with this id is already in the tree.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: RecordKind, id: UiId },

    /// An equipment is still referenced by live tasks or entries.
    #[error("equipment {id} still has {tasks} tasks and {entries} entries")]
    HasDependents { id: UiId, tasks: usize, entries: usize },

    /// A user still owns equipment.
    #[error("user {id} still owns {equipments} equipments")]
    HasChildren { id: UiId, equipments: usize },

    /// A replacement record carries another record's identity.
    #[error("identity mismatch: expected {expected}, got {actual}")]
    IdentityMismatch { expected: UiId, actual: UiId },

    /// A replacement record moved to another parent.
    #[error("{kind} {id} cannot change parent")]
    ParentMismatch { kind: RecordKind, id: UiId },

    /// Task level outside 0..=3.
    #[error("invalid task level: {0}")]
    InvalidLevel(i64),

    /// The remote commit of a record failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
