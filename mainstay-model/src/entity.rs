//! Single-record wrapper that owns a record and gates its replacement.

use crate::{ModelError, ModelResult, Record};
use mainstay_types::{RemoteResult, UiId};
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Owns exactly one record and is the only place allowed to replace it.
///
/// Readers get owned snapshots through [`Entity::get_model`]; a snapshot
/// must not be held across an `await` that could span a mutation.
#[derive(Debug)]
pub struct Entity<R: Record> {
    ui_id: UiId,
    model: RwLock<R>,
}

impl<R: Record> Entity<R> {
    /// Wraps a record, normalizing it first.
    pub fn new(record: R) -> Self {
        Self {
            ui_id: record.ui_id(),
            model: RwLock::new(record.normalized()),
        }
    }

    /// The record's client id. Fixed for the life of the wrapper.
    pub fn ui_id(&self) -> UiId {
        self.ui_id
    }

    /// Snapshot of the current record.
    pub fn get_model(&self) -> R {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the held record has never been persisted.
    pub fn is_new(&self) -> bool {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_new()
    }

    /// Replaces the held record.
    pub fn set_model(&self, record: R) -> ModelResult<()> {
        self.check_identity(&record)?;
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = record.normalized();
        Ok(())
    }

    /// Commits a replacement through `remote` and stores whatever the
    /// remote side returns as authoritative. Resolves only once the held
    /// record has been replaced; on failure the held record is untouched.
    pub async fn save<F, Fut>(&self, record: R, remote: F) -> ModelResult<R>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = RemoteResult<R>>,
    {
        self.check_identity(&record)?;
        let record = record.normalized();
        debug!("Saving {} {} (new={})", R::KIND, self.ui_id, record.is_new());

        let saved = remote(record).await?.normalized();
        self.set_model(saved.clone())?;
        Ok(saved)
    }

    fn check_identity(&self, record: &R) -> ModelResult<()> {
        if record.ui_id() != self.ui_id {
            return Err(ModelError::IdentityMismatch {
                expected: self.ui_id,
                actual: record.ui_id(),
            });
        }
        Ok(())
    }
}
