//! Editing surfaces for Mainstay records.
//!
//! [`EditModalLogic`] drives save, two-step delete and close for any record
//! type, configured through an [`EditModalConfig`]. [`EditModal`] holds the
//! surface's visibility and selected record.

mod logic;
mod modal;
mod operation;

pub use logic::{EditModalLogic, EditState};
pub use modal::EditModal;
pub use operation::{DeleteOperation, EditModalConfig, RemoteFuture, SaveOperation};
