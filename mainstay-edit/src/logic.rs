//! Save/delete state machine behind every editing surface.
//!
//! Busy flags are always cleared once a remote call settles, and also when
//! the operation's future is dropped before it does. Structured
//! server rejections ([`HttpError`](mainstay_types::HttpError)) become
//! field alerts; anything else is logged and swallowed so the surface stays
//! usable.

use crate::EditModalConfig;
use mainstay_types::{Alerts, RemoteError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Observable state of an editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    pub is_saving: bool,
    pub is_deleting: bool,
    /// Field name to error code, from the last rejected save or delete.
    pub alerts: Option<Alerts>,
    /// Whether the delete confirmation gate is open.
    pub yes_no_modal_visibility: bool,
}

fn lock_state(state: &Mutex<EditState>) -> MutexGuard<'_, EditState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Raises one busy flag and lowers it again on drop.
struct BusyGuard<'a> {
    state: &'a Mutex<EditState>,
    flag: fn(&mut EditState) -> &mut bool,
}

impl<'a> BusyGuard<'a> {
    fn raise(state: &'a Mutex<EditState>, flag: fn(&mut EditState) -> &mut bool) -> Self {
        *flag(&mut lock_state(state)) = true;
        Self { state, flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *(self.flag)(&mut lock_state(self.state)) = false;
    }
}

/// Orchestrates save, delete and close for one editing surface.
///
/// Methods take `&self`; share the logic behind an `Arc` to observe
/// [`state`](Self::state) while a save or delete is in flight.
pub struct EditModalLogic<T, SP, DP = ()> {
    config: EditModalConfig<T, SP, DP>,
    state: Mutex<EditState>,
}

impl<T, SP, DP> EditModalLogic<T, SP, DP>
where
    T: Send + 'static,
    SP: Clone,
    DP: Clone,
{
    pub fn new(config: EditModalConfig<T, SP, DP>) -> Self {
        Self {
            config,
            state: Mutex::new(EditState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditState> {
        lock_state(&self.state)
    }

    fn update(&self, f: impl FnOnce(&mut EditState)) {
        f(&mut self.lock());
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> EditState {
        self.lock().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.lock().is_saving
    }

    pub fn is_deleting(&self) -> bool {
        self.lock().is_deleting
    }

    pub fn alerts(&self) -> Option<Alerts> {
        self.lock().alerts.clone()
    }

    pub fn yes_no_modal_visibility(&self) -> bool {
        self.lock().yes_no_modal_visibility
    }

    /// Transforms, saves and on success hands the persisted record to
    /// `on_saved` before closing the surface.
    pub async fn handle_submit(&self, data: T) {
        let _saving = BusyGuard::raise(&self.state, |s| &mut s.is_saving);

        let data = match &self.config.before_save {
            Some(transform) => transform(data),
            None => data,
        };

        match self.config.save.invoke(data).await {
            Ok(saved) => {
                debug!("Save succeeded");
                if let Some(on_saved) = &self.config.on_saved {
                    on_saved(saved);
                }
                self.update(|s| s.alerts = None);
                self.close();
            }
            Err(e) => self.reject("save", e),
        }
    }

    /// Opens the delete confirmation gate. Never deletes by itself.
    pub fn handle_delete(&self) {
        self.update(|s| s.yes_no_modal_visibility = true);
    }

    /// Confirms the delete.
    pub async fn yes_delete(&self) {
        let Some(delete) = &self.config.delete else {
            warn!("Delete confirmed on a surface without a delete operation");
            return;
        };

        let _deleting = BusyGuard::raise(&self.state, |s| &mut s.is_deleting);

        match delete.invoke().await {
            Ok(deleted) => {
                debug!("Delete succeeded");
                if let Some(on_deleted) = &self.config.on_deleted {
                    on_deleted(deleted);
                }
                self.update(|s| {
                    s.alerts = None;
                    s.yes_no_modal_visibility = false;
                });
                self.close();
            }
            Err(e) => self.reject("delete", e),
        }
    }

    /// Dismisses the confirmation gate.
    pub fn no_delete(&self) {
        self.update(|s| s.yes_no_modal_visibility = false);
    }

    /// Clears alerts and closes the surface.
    pub fn cancel(&self) {
        self.update(|s| s.alerts = None);
        self.close();
    }

    fn close(&self) {
        if let Some(on_close) = &self.config.on_close {
            on_close();
        }
    }

    fn reject(&self, operation: &str, err: RemoteError) {
        match err {
            RemoteError::Http(http) => {
                debug!("Server rejected {}: {}", operation, http);
                self.update(|s| s.alerts = Some(http.into_data()));
            }
            other => warn!("Unexpected {} failure: {}", operation, other),
        }
    }
}
