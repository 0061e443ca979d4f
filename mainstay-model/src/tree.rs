//! Arena holding the User → Equipment → Task → Entry ownership tree.
//!
//! Nodes are stored flat, keyed by `_uiId`. Ownership is expressed only by
//! the parent-id fields of each record (`ownerUiId`, `equipmentUiId`,
//! `taskUiId`), so traversal is an index lookup. The tree exclusively owns
//! every [`Entity`] wrapper; callers borrow them.
//!
//! Removal never cascades implicitly. [`EntityTree::remove_equipment`]
//! refuses while tasks or entries still point at the equipment;
//! [`EntityTree::remove_equipment_cascade`] removes them first.

use crate::{
    Entity, EntryRecord, EquipmentRecord, ModelError, ModelResult, ParentContext, Record,
    RecordKind, TaskRecord, UserRecord,
};
use mainstay_types::UiId;
use std::collections::hash_map::{Entry as Slot, HashMap};
use tracing::debug;

#[derive(Debug, Default)]
pub struct EntityTree {
    users: HashMap<UiId, Entity<UserRecord>>,
    equipments: HashMap<UiId, Entity<EquipmentRecord>>,
    tasks: HashMap<UiId, Entity<TaskRecord>>,
    entries: HashMap<UiId, Entity<EntryRecord>>,
}

fn insert<R: Record>(map: &mut HashMap<UiId, Entity<R>>, record: R) -> ModelResult<&Entity<R>> {
    let id = record.ui_id();
    match map.entry(id) {
        Slot::Occupied(_) => Err(ModelError::AlreadyExists { kind: R::KIND, id }),
        Slot::Vacant(slot) => {
            debug!("Added {} {}", R::KIND, id);
            Ok(slot.insert(Entity::new(record)))
        }
    }
}

fn lookup<R: Record>(map: &HashMap<UiId, Entity<R>>, id: UiId) -> ModelResult<&Entity<R>> {
    map.get(&id)
        .ok_or(ModelError::NotFound { kind: R::KIND, id })
}

fn take<R: Record>(map: &mut HashMap<UiId, Entity<R>>, id: UiId) -> ModelResult<R> {
    let entity = map
        .remove(&id)
        .ok_or(ModelError::NotFound { kind: R::KIND, id })?;
    debug!("Removed {} {}", R::KIND, id);
    Ok(entity.get_model())
}

fn collect_sorted<R, F, K>(map: &HashMap<UiId, Entity<R>>, keep: F, key: impl Fn(&R) -> K) -> Vec<R>
where
    R: Record,
    F: Fn(&R) -> bool,
    K: Ord,
{
    let mut records: Vec<R> = map
        .values()
        .map(Entity::get_model)
        .filter(|r| keep(r))
        .collect();
    records.sort_by_key(|r| key(r));
    records
}

impl EntityTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records of every kind.
    pub fn len(&self) -> usize {
        self.users.len() + self.equipments.len() + self.tasks.len() + self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Insertion ────────────────────────────────────────────────

    pub fn add_user(&mut self, record: UserRecord) -> ModelResult<&Entity<UserRecord>> {
        insert(&mut self.users, record)
    }

    /// Adds an equipment under its `ownerUiId`. The owner must exist.
    pub fn add_equipment(
        &mut self,
        record: EquipmentRecord,
    ) -> ModelResult<&Entity<EquipmentRecord>> {
        if !self.users.contains_key(&record.owner_ui_id) {
            return Err(ModelError::ParentNotFound {
                kind: RecordKind::User,
                id: record.owner_ui_id,
            });
        }
        insert(&mut self.equipments, record)
    }

    /// Adds a task under its `equipmentUiId`. The equipment must exist.
    pub fn add_task(&mut self, record: TaskRecord) -> ModelResult<&Entity<TaskRecord>> {
        if !self.equipments.contains_key(&record.equipment_ui_id) {
            return Err(ModelError::ParentNotFound {
                kind: RecordKind::Equipment,
                id: record.equipment_ui_id,
            });
        }
        insert(&mut self.tasks, record)
    }

    /// Adds an entry under `parent`, overwriting the record's parent ids
    /// from the context.
    pub fn add_entry(
        &mut self,
        record: EntryRecord,
        parent: ParentContext,
    ) -> ModelResult<&Entity<EntryRecord>> {
        let record = self.attach_entry(record, parent)?;
        insert(&mut self.entries, record)
    }

    fn attach_entry(&self, mut record: EntryRecord, parent: ParentContext) -> ModelResult<EntryRecord> {
        record.equipment_ui_id = self.resolve_equipment(parent)?;
        record.task_ui_id = match parent {
            ParentContext::Task { task_id } => Some(task_id),
            ParentContext::Equipment { .. } => None,
        };
        Ok(record)
    }

    // ── Lookup ───────────────────────────────────────────────────

    pub fn user(&self, id: UiId) -> ModelResult<&Entity<UserRecord>> {
        lookup(&self.users, id)
    }

    pub fn equipment(&self, id: UiId) -> ModelResult<&Entity<EquipmentRecord>> {
        lookup(&self.equipments, id)
    }

    pub fn task(&self, id: UiId) -> ModelResult<&Entity<TaskRecord>> {
        lookup(&self.tasks, id)
    }

    pub fn entry(&self, id: UiId) -> ModelResult<&Entity<EntryRecord>> {
        lookup(&self.entries, id)
    }

    /// Equipment owned by `owner`, sorted by name.
    pub fn equipments_of(&self, owner: UiId) -> Vec<EquipmentRecord> {
        collect_sorted(
            &self.equipments,
            |e| e.owner_ui_id == owner,
            |e| e.name.clone(),
        )
    }

    /// Tasks of `equipment`, sorted by name.
    pub fn tasks_of(&self, equipment: UiId) -> Vec<TaskRecord> {
        collect_sorted(
            &self.tasks,
            |t| t.equipment_ui_id == equipment,
            |t| t.name.clone(),
        )
    }

    /// Entries acknowledging `task`, oldest first.
    pub fn entries_of_task(&self, task: UiId) -> Vec<EntryRecord> {
        collect_sorted(&self.entries, |e| e.task_ui_id == Some(task), |e| e.date)
    }

    /// Entries attached directly to `equipment`, oldest first.
    pub fn orphan_entries_of(&self, equipment: UiId) -> Vec<EntryRecord> {
        collect_sorted(
            &self.entries,
            |e| e.is_orphan() && e.equipment_ui_id == equipment,
            |e| e.date,
        )
    }

    /// Every entry referencing `equipment`, task entries included.
    pub fn entries_of_equipment(&self, equipment: UiId) -> Vec<EntryRecord> {
        collect_sorted(
            &self.entries,
            |e| e.equipment_ui_id == equipment,
            |e| e.date,
        )
    }

    /// Resolves the equipment an entry under `parent` belongs to.
    pub fn resolve_equipment(&self, parent: ParentContext) -> ModelResult<UiId> {
        match parent {
            ParentContext::Task { task_id } => self
                .tasks
                .get(&task_id)
                .map(|t| t.get_model().equipment_ui_id)
                .ok_or(ModelError::ParentNotFound {
                    kind: RecordKind::Task,
                    id: task_id,
                }),
            ParentContext::Equipment { equipment_id } => {
                if self.equipments.contains_key(&equipment_id) {
                    Ok(equipment_id)
                } else {
                    Err(ModelError::ParentNotFound {
                        kind: RecordKind::Equipment,
                        id: equipment_id,
                    })
                }
            }
        }
    }

    // ── Replacement ──────────────────────────────────────────────

    pub fn save_user(&self, record: UserRecord) -> ModelResult<()> {
        self.user(record.ui_id)?.set_model(record)
    }

    /// Replaces an equipment. Ownership cannot change through a save.
    pub fn save_equipment(&self, record: EquipmentRecord) -> ModelResult<()> {
        let entity = self.equipment(record.ui_id)?;
        if entity.get_model().owner_ui_id != record.owner_ui_id {
            return Err(ModelError::ParentMismatch {
                kind: RecordKind::Equipment,
                id: record.ui_id,
            });
        }
        entity.set_model(record)
    }

    /// Replaces a task. The parent equipment cannot change through a save.
    pub fn save_task(&self, record: TaskRecord) -> ModelResult<()> {
        let entity = self.task(record.ui_id)?;
        if entity.get_model().equipment_ui_id != record.equipment_ui_id {
            return Err(ModelError::ParentMismatch {
                kind: RecordKind::Task,
                id: record.ui_id,
            });
        }
        entity.set_model(record)
    }

    /// Replaces an entry, re-deriving its parent ids from `parent`.
    pub fn save_entry(&self, record: EntryRecord, parent: ParentContext) -> ModelResult<()> {
        let entity = self.entry(record.ui_id)?;
        let record = self.attach_entry(record, parent)?;
        entity.set_model(record)
    }

    // ── Removal ──────────────────────────────────────────────────

    pub fn remove_entry(&mut self, id: UiId) -> ModelResult<EntryRecord> {
        take(&mut self.entries, id)
    }

    /// Removes a task. Its entries are left in place.
    pub fn remove_task(&mut self, id: UiId) -> ModelResult<TaskRecord> {
        take(&mut self.tasks, id)
    }

    /// Removes an equipment that no task or entry references any more.
    pub fn remove_equipment(&mut self, id: UiId) -> ModelResult<EquipmentRecord> {
        lookup(&self.equipments, id)?;
        let tasks = self.tasks_of(id).len();
        let entries = self.entries_of_equipment(id).len();
        if tasks > 0 || entries > 0 {
            return Err(ModelError::HasDependents { id, tasks, entries });
        }
        take(&mut self.equipments, id)
    }

    /// Removes an equipment together with its entries and tasks, children
    /// first.
    pub fn remove_equipment_cascade(&mut self, id: UiId) -> ModelResult<EquipmentRecord> {
        lookup(&self.equipments, id)?;
        for entry in self.entries_of_equipment(id) {
            self.remove_entry(entry.ui_id)?;
        }
        for task in self.tasks_of(id) {
            self.remove_task(task.ui_id)?;
        }
        self.remove_equipment(id)
    }

    /// Removes a user that owns no equipment.
    pub fn remove_user(&mut self, id: UiId) -> ModelResult<UserRecord> {
        lookup(&self.users, id)?;
        let equipments = self.equipments_of(id).len();
        if equipments > 0 {
            return Err(ModelError::HasChildren { id, equipments });
        }
        take(&mut self.users, id)
    }
}
