//! Records of the User → Equipment → Task → Entry tree.
//!
//! Field names serialize in camelCase with `_uiId`/`_id` for the two keys.

use chrono::{DateTime, Utc};
use mainstay_types::{ServerId, UiId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::level::TaskLevel;
use crate::ModelResult;

/// Value stored in place of a usage period or an age that does not apply.
pub const NOT_APPLICABLE: i64 = -1;

/// The four record types of the ownership tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Equipment,
    Task,
    Entry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Equipment => "equipment",
            Self::Task => "task",
            Self::Entry => "entry",
        })
    }
}

/// Common identity contract of every record.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Client-generated stable id.
    fn ui_id(&self) -> UiId;

    /// Server-assigned id, absent until first persisted.
    fn id(&self) -> Option<&ServerId>;

    /// A record is new until the server has assigned it an id.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Returns the record in the form it must be persisted in.
    fn normalized(self) -> Self {
        self
    }
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl Record for $ty {
            const KIND: RecordKind = $kind;

            fn ui_id(&self) -> UiId {
                self.ui_id
            }

            fn id(&self) -> Option<&ServerId> {
                self.id.as_ref()
            }
        }
    };
}

// ── User ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_uiId")]
    pub ui_id: UiId,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServerId>,
    pub email: String,
    pub name: String,
    pub firstname: String,
    #[serde(default)]
    pub imperial_units: bool,
}

impl UserRecord {
    /// A blank user that has not been registered yet.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            ui_id: UiId::new(),
            id: None,
            email: email.into(),
            name: String::new(),
            firstname: String::new(),
            imperial_units: false,
        }
    }
}

impl_record!(UserRecord, RecordKind::User);

// ── Equipment ────────────────────────────────────────────────────

/// How an equipment's age is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeAcquisitionType {
    /// Pure time-based aging. The equipment has no usage counter.
    Time,
    /// The user records the running hours by hand.
    ManualEntry,
    /// The running hours are pushed by an external tag/reader.
    Tag,
}

impl AgeAcquisitionType {
    /// Whether the equipment tracks a usage counter in hours.
    pub fn tracks_usage(self) -> bool {
        !matches!(self, Self::Time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    #[serde(rename = "_uiId")]
    pub ui_id: UiId,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServerId>,
    pub owner_ui_id: UiId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    /// Current running hours. Meaningless for time-based aging.
    pub age: i64,
    pub installation: DateTime<Utc>,
    pub age_acquisition_type: AgeAcquisitionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_url: Option<String>,
}

impl_record!(EquipmentRecord, RecordKind::Equipment);

// ── Task ─────────────────────────────────────────────────────────

/// Coerces a usage period to its persisted form: unset, zero or negative
/// periods become [`NOT_APPLICABLE`].
pub fn normalize_usage_period(period: Option<i64>) -> i64 {
    match period {
        Some(hours) if hours > 0 => hours,
        _ => NOT_APPLICABLE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(rename = "_uiId")]
    pub ui_id: UiId,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServerId>,
    pub equipment_ui_id: UiId,
    pub name: String,
    #[serde(default)]
    pub usage_period_in_hour: Option<i64>,
    pub period_in_month: u32,
    #[serde(default)]
    pub description: String,
    /// Due-date classification computed by the backend (see [`TaskLevel`]).
    #[serde(default)]
    pub level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_in_hour_left: Option<i64>,
}

impl TaskRecord {
    /// Classifies the task. Values outside 0..=3 are reported as errors.
    pub fn level(&self) -> ModelResult<TaskLevel> {
        TaskLevel::try_from(self.level)
    }

    /// Whether the task is scheduled by running hours as well as by time.
    pub fn is_usage_based(&self) -> bool {
        normalize_usage_period(self.usage_period_in_hour) != NOT_APPLICABLE
    }
}

impl Record for TaskRecord {
    const KIND: RecordKind = RecordKind::Task;

    fn ui_id(&self) -> UiId {
        self.ui_id
    }

    fn id(&self) -> Option<&ServerId> {
        self.id.as_ref()
    }

    fn normalized(mut self) -> Self {
        self.usage_period_in_hour = Some(normalize_usage_period(self.usage_period_in_hour));
        self
    }
}

// ── Entry ────────────────────────────────────────────────────────

/// Where an entry hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ParentContext {
    /// Acknowledgement of a scheduled task.
    Task { task_id: UiId },
    /// Free-form history attached directly to an equipment (orphan entry).
    Equipment { equipment_id: UiId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(rename = "_uiId")]
    pub ui_id: UiId,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServerId>,
    pub name: String,
    pub date: DateTime<Utc>,
    /// Equipment running hours when the entry was made, or -1.
    pub age: i64,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ui_id: Option<UiId>,
    /// Kept even for task entries so orphan views can list them.
    pub equipment_ui_id: UiId,
}

impl EntryRecord {
    /// The entry's parent as recorded in its ids.
    pub fn parent_context(&self) -> ParentContext {
        match self.task_ui_id {
            Some(task_id) => ParentContext::Task { task_id },
            None => ParentContext::Equipment {
                equipment_id: self.equipment_ui_id,
            },
        }
    }

    /// Whether the entry is attached directly to an equipment.
    pub fn is_orphan(&self) -> bool {
        self.task_ui_id.is_none()
    }
}

impl_record!(EntryRecord, RecordKind::Entry);
