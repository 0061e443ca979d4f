//! Blank-record constructors.
//!
//! Every constructor is a pure function of its ancestors' current state.
//! Aging-dependent seeding happens here once so editing surfaces never
//! special-case the equipment's aging type.

use crate::{
    AgeAcquisitionType, EntryRecord, EquipmentRecord, ModelError, ModelResult, NOT_APPLICABLE,
    RecordKind, TaskRecord, UserRecord,
};
use chrono::Utc;
use mainstay_types::UiId;

/// Seed values for blank records.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Usage period given to new tasks of equipment that tracks running hours.
    pub default_usage_period_in_hour: i64,
    /// Time period given to every new task.
    pub default_month_period: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_usage_period_in_hour: 100,
            default_month_period: 12,
        }
    }
}

/// Age recorded by a new entry: the equipment's current running hours, or
/// [`NOT_APPLICABLE`] under time-based aging.
pub fn default_entry_age(equipment: &EquipmentRecord) -> i64 {
    if equipment.age_acquisition_type.tracks_usage() {
        equipment.age
    } else {
        NOT_APPLICABLE
    }
}

pub fn create_default_equipment(owner: &UserRecord) -> EquipmentRecord {
    EquipmentRecord {
        ui_id: UiId::new(),
        id: None,
        owner_ui_id: owner.ui_id,
        name: String::new(),
        brand: String::new(),
        model: String::new(),
        age: 0,
        installation: Utc::now(),
        age_acquisition_type: AgeAcquisitionType::Time,
        age_url: None,
    }
}

pub fn create_default_task(equipment: &EquipmentRecord, config: &ModelConfig) -> TaskRecord {
    let usage_period = if equipment.age_acquisition_type.tracks_usage() {
        config.default_usage_period_in_hour
    } else {
        NOT_APPLICABLE
    };

    TaskRecord {
        ui_id: UiId::new(),
        id: None,
        equipment_ui_id: equipment.ui_id,
        name: String::new(),
        usage_period_in_hour: Some(usage_period),
        period_in_month: config.default_month_period,
        description: String::new(),
        level: 0,
        next_due_date: None,
        usage_in_hour_left: None,
    }
}

pub fn create_default_orphan_entry(equipment: &EquipmentRecord) -> EntryRecord {
    EntryRecord {
        ui_id: UiId::new(),
        id: None,
        name: String::new(),
        date: Utc::now(),
        age: default_entry_age(equipment),
        remarks: String::new(),
        task_ui_id: None,
        equipment_ui_id: equipment.ui_id,
    }
}

/// Blank acknowledgement of `task`, named after it.
///
/// Fails with [`ModelError::ParentMismatch`] when `task` does not belong to
/// `equipment`, since the age would be seeded from the wrong equipment.
pub fn create_default_entry(
    equipment: &EquipmentRecord,
    task: &TaskRecord,
) -> ModelResult<EntryRecord> {
    if task.equipment_ui_id != equipment.ui_id {
        return Err(ModelError::ParentMismatch {
            kind: RecordKind::Task,
            id: task.ui_id,
        });
    }

    Ok(EntryRecord {
        name: task.name.clone(),
        task_ui_id: Some(task.ui_id),
        ..create_default_orphan_entry(equipment)
    })
}
