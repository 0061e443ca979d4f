//! Maintenance entity model for Mainstay.
//!
//! Defines the ownership tree every editing surface works on:
//! - [`UserRecord`] owns [`EquipmentRecord`]s
//! - [`EquipmentRecord`] owns [`TaskRecord`]s and orphan [`EntryRecord`]s
//! - [`TaskRecord`] owns acknowledgement [`EntryRecord`]s
//!
//! [`Entity`] wraps one record and is the only path that replaces it.
//! [`EntityTree`] is the arena that owns the wrappers and resolves parents
//! by id. Blank records come from the pure constructors in [`defaults`].

pub mod defaults;
mod entity;
mod error;
mod level;
mod records;
mod tree;

pub use defaults::{
    create_default_entry, create_default_equipment, create_default_orphan_entry,
    create_default_task, ModelConfig,
};
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use level::TaskLevel;
pub use records::{
    normalize_usage_period, AgeAcquisitionType, EntryRecord, EquipmentRecord, ParentContext,
    Record, RecordKind, TaskRecord, UserRecord, NOT_APPLICABLE,
};
pub use tree::EntityTree;
