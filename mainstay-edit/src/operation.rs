//! Strongly-typed configuration of an editing surface's remote calls.
//!
//! Each remote call is bound to its fixed parameters when the surface is
//! built, so the record type flows through the async boundary unchanged.

use futures::future::BoxFuture;
use mainstay_model::Record;
use mainstay_types::RemoteResult;
use std::fmt;
use std::sync::Arc;

/// Future returned by a remote save or delete.
pub type RemoteFuture<T> = BoxFuture<'static, RemoteResult<T>>;

type SaveCall<T, P> = Arc<dyn Fn(P, T) -> RemoteFuture<T> + Send + Sync>;
type DeleteCall<T, P> = Arc<dyn Fn(P) -> RemoteFuture<T> + Send + Sync>;
type Callback<A> = Box<dyn Fn(A) + Send + Sync>;

/// Remote save `(params, record) -> persisted record`.
pub struct SaveOperation<T, P> {
    call: SaveCall<T, P>,
    params: P,
}

impl<T, P: Clone> SaveOperation<T, P> {
    pub fn new<F>(call: F, params: P) -> Self
    where
        F: Fn(P, T) -> RemoteFuture<T> + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(call),
            params,
        }
    }

    pub(crate) fn invoke(&self, record: T) -> RemoteFuture<T> {
        (self.call)(self.params.clone(), record)
    }
}

/// Remote delete `(params) -> last known state of the deleted record`.
pub struct DeleteOperation<T, P> {
    call: DeleteCall<T, P>,
    params: P,
}

impl<T, P: Clone> DeleteOperation<T, P> {
    pub fn new<F>(call: F, params: P) -> Self
    where
        F: Fn(P) -> RemoteFuture<T> + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(call),
            params,
        }
    }

    pub(crate) fn invoke(&self) -> RemoteFuture<T> {
        (self.call)(self.params.clone())
    }
}

/// Everything an [`EditModalLogic`](crate::EditModalLogic) needs, resolved
/// at construction time.
pub struct EditModalConfig<T, SP, DP = ()> {
    pub(crate) save: SaveOperation<T, SP>,
    pub(crate) delete: Option<DeleteOperation<T, DP>>,
    pub(crate) before_save: Option<Box<dyn Fn(T) -> T + Send + Sync>>,
    pub(crate) on_saved: Option<Callback<T>>,
    pub(crate) on_deleted: Option<Callback<T>>,
    pub(crate) on_close: Option<Box<dyn Fn() + Send + Sync>>,
}

impl<T, SP> EditModalConfig<T, SP, ()> {
    /// A surface that can only save.
    pub fn new(save: SaveOperation<T, SP>) -> Self {
        Self {
            save,
            delete: None,
            before_save: None,
            on_saved: None,
            on_deleted: None,
            on_close: None,
        }
    }
}

impl<T, SP, DP> EditModalConfig<T, SP, DP> {
    /// Adds the remote delete.
    pub fn with_delete<D>(self, delete: DeleteOperation<T, D>) -> EditModalConfig<T, SP, D> {
        EditModalConfig {
            save: self.save,
            delete: Some(delete),
            before_save: self.before_save,
            on_saved: self.on_saved,
            on_deleted: self.on_deleted,
            on_close: self.on_close,
        }
    }

    /// Synchronous transform applied to submitted data before the save.
    pub fn before_save(mut self, transform: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        self.before_save = Some(Box::new(transform));
        self
    }

    /// Receives the persisted record after a successful save.
    pub fn on_saved(mut self, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.on_saved = Some(Box::new(callback));
        self
    }

    /// Receives the server's response after a successful delete.
    pub fn on_deleted(mut self, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.on_deleted = Some(Box::new(callback));
        self
    }

    /// Closes the edit surface.
    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }
}

impl<T: Record, SP, DP> EditModalConfig<T, SP, DP> {
    /// Normalizes records to their persisted form before every save.
    pub fn normalize_before_save(self) -> Self {
        self.before_save(T::normalized)
    }
}

impl<T, SP: fmt::Debug, DP: fmt::Debug> fmt::Debug for EditModalConfig<T, SP, DP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditModalConfig")
            .field("save_params", &self.save.params)
            .field("delete_params", &self.delete.as_ref().map(|d| &d.params))
            .field("before_save", &self.before_save.is_some())
            .finish_non_exhaustive()
    }
}
