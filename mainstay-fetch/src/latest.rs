//! Single-slot "always current" callback cell.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

type Handler<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Single-slot cell holding the most recently registered handler.
///
/// Clones share the slot: whoever holds a clone always invokes the handler
/// registered last, never one captured at the time the clone was taken.
pub struct LatestHandler<A> {
    slot: Arc<RwLock<Option<Handler<A>>>>,
}

impl<A> LatestHandler<A> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the registered handler.
    pub fn register<F>(&self, handler: F)
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
    }

    /// Calls the current handler. Returns `false` when none is registered.
    ///
    /// The slot is not locked while the handler runs, so a handler may
    /// register its own replacement.
    pub fn invoke(&self, arg: A) -> bool {
        let handler = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match handler {
            Some(handler) => {
                handler(arg);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_registered(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<A> Clone for LatestHandler<A> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<A> Default for LatestHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for LatestHandler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatestHandler")
            .field("registered", &self.is_registered())
            .finish()
    }
}
