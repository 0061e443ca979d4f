use chrono::{Duration, Utc};
use mainstay_model::{
    create_default_entry, create_default_equipment, create_default_orphan_entry,
    create_default_task, AgeAcquisitionType, EntityTree, EquipmentRecord, ModelConfig,
    ModelError, ParentContext, RecordKind, TaskRecord, UserRecord,
};
use mainstay_types::UiId;

struct Fixture {
    tree: EntityTree,
    user: UserRecord,
    equipment: EquipmentRecord,
    task: TaskRecord,
}

fn fixture() -> Fixture {
    let mut tree = EntityTree::new();
    let user = UserRecord::new("skipper@example.com");
    tree.add_user(user.clone()).unwrap();

    let mut equipment = create_default_equipment(&user);
    equipment.name = "Engine".into();
    equipment.age_acquisition_type = AgeAcquisitionType::ManualEntry;
    equipment.age = 800;
    tree.add_equipment(equipment.clone()).unwrap();

    let mut task = create_default_task(&equipment, &ModelConfig::default());
    task.name = "Oil".into();
    tree.add_task(task.clone()).unwrap();

    Fixture { tree, user, equipment, task }
}

// ── Insertion ────────────────────────────────────────────────────

#[test]
fn equipment_requires_existing_owner() {
    let mut tree = EntityTree::new();
    let stray = create_default_equipment(&UserRecord::new("nobody@example.com"));
    let err = tree.add_equipment(stray.clone()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::ParentNotFound { kind: RecordKind::User, id } if id == stray.owner_ui_id
    ));
    assert!(tree.is_empty());
}

#[test]
fn task_requires_existing_equipment() {
    let mut f = fixture();
    let mut orphan_task = f.task.clone();
    orphan_task.ui_id = UiId::new();
    orphan_task.equipment_ui_id = UiId::new();
    let err = f.tree.add_task(orphan_task).unwrap_err();
    assert!(matches!(err, ModelError::ParentNotFound { kind: RecordKind::Equipment, .. }));
}

#[test]
fn duplicate_ui_id_is_rejected() {
    let mut f = fixture();
    let err = f.tree.add_task(f.task.clone()).unwrap_err();
    assert!(matches!(err, ModelError::AlreadyExists { kind: RecordKind::Task, .. }));
}

#[test]
fn task_entry_gets_equipment_from_task() {
    let mut f = fixture();
    let mut entry = create_default_entry(&f.equipment, &f.task).unwrap();
    entry.equipment_ui_id = UiId::new();

    let parent = ParentContext::Task { task_id: f.task.ui_id };
    let stored = f.tree.add_entry(entry, parent).unwrap().get_model();
    assert_eq!(stored.equipment_ui_id, f.equipment.ui_id);
    assert_eq!(stored.task_ui_id, Some(f.task.ui_id));
    assert_eq!(stored.parent_context(), parent);
}

#[test]
fn orphan_entry_clears_task_link() {
    let mut f = fixture();
    let mut entry = create_default_orphan_entry(&f.equipment);
    entry.task_ui_id = Some(f.task.ui_id);

    let parent = ParentContext::Equipment { equipment_id: f.equipment.ui_id };
    let stored = f.tree.add_entry(entry, parent).unwrap().get_model();
    assert!(stored.is_orphan());
    assert_eq!(stored.equipment_ui_id, f.equipment.ui_id);
}

#[test]
fn entry_under_missing_task_is_rejected() {
    let mut f = fixture();
    let entry = create_default_orphan_entry(&f.equipment);
    let err = f
        .tree
        .add_entry(entry, ParentContext::Task { task_id: UiId::new() })
        .unwrap_err();
    assert!(matches!(err, ModelError::ParentNotFound { kind: RecordKind::Task, .. }));
}

// ── Traversal ────────────────────────────────────────────────────

#[test]
fn children_are_listed_per_parent() {
    let mut f = fixture();
    let task_parent = ParentContext::Task { task_id: f.task.ui_id };
    let eq_parent = ParentContext::Equipment { equipment_id: f.equipment.ui_id };

    let mut older = create_default_entry(&f.equipment, &f.task).unwrap();
    older.date = Utc::now() - Duration::days(30);
    let newer = create_default_entry(&f.equipment, &f.task).unwrap();
    let orphan = create_default_orphan_entry(&f.equipment);

    f.tree.add_entry(newer.clone(), task_parent).unwrap();
    f.tree.add_entry(older.clone(), task_parent).unwrap();
    f.tree.add_entry(orphan.clone(), eq_parent).unwrap();

    let task_entries: Vec<_> = f.tree.entries_of_task(f.task.ui_id).iter().map(|e| e.ui_id).collect();
    assert_eq!(task_entries, vec![older.ui_id, newer.ui_id]);

    let orphans = f.tree.orphan_entries_of(f.equipment.ui_id);
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].ui_id, orphan.ui_id);

    assert_eq!(f.tree.entries_of_equipment(f.equipment.ui_id).len(), 3);
    assert_eq!(f.tree.equipments_of(f.user.ui_id).len(), 1);
    assert_eq!(f.tree.tasks_of(f.equipment.ui_id).len(), 1);
}

#[test]
fn resolve_equipment_for_both_contexts() {
    let f = fixture();
    assert_eq!(
        f.tree.resolve_equipment(ParentContext::Task { task_id: f.task.ui_id }).unwrap(),
        f.equipment.ui_id
    );
    assert_eq!(
        f.tree
            .resolve_equipment(ParentContext::Equipment { equipment_id: f.equipment.ui_id })
            .unwrap(),
        f.equipment.ui_id
    );
}

// ── Replacement ──────────────────────────────────────────────────

#[test]
fn save_task_goes_through_entity() {
    let f = fixture();
    let mut edited = f.tree.task(f.task.ui_id).unwrap().get_model();
    edited.usage_period_in_hour = Some(-20);
    f.tree.save_task(edited).unwrap();
    assert_eq!(f.tree.task(f.task.ui_id).unwrap().get_model().usage_period_in_hour, Some(-1));
}

#[test]
fn save_task_cannot_move_to_other_equipment() {
    let f = fixture();
    let mut edited = f.task.clone();
    edited.equipment_ui_id = UiId::new();
    let err = f.tree.save_task(edited).unwrap_err();
    assert!(matches!(err, ModelError::ParentMismatch { kind: RecordKind::Task, .. }));
}

#[test]
fn save_entry_can_move_between_task_and_equipment() {
    let mut f = fixture();
    let entry = create_default_entry(&f.equipment, &f.task).unwrap();
    f.tree
        .add_entry(entry.clone(), ParentContext::Task { task_id: f.task.ui_id })
        .unwrap();

    f.tree
        .save_entry(entry.clone(), ParentContext::Equipment { equipment_id: f.equipment.ui_id })
        .unwrap();
    assert!(f.tree.entry(entry.ui_id).unwrap().get_model().is_orphan());
}

#[test]
fn save_unknown_record_is_not_found() {
    let f = fixture();
    let mut stray = f.task.clone();
    stray.ui_id = UiId::new();
    assert!(matches!(
        f.tree.save_task(stray),
        Err(ModelError::NotFound { kind: RecordKind::Task, .. })
    ));
}

// ── Removal ──────────────────────────────────────────────────────

#[test]
fn equipment_with_dependents_cannot_be_removed() {
    let mut f = fixture();
    let entry = create_default_orphan_entry(&f.equipment);
    f.tree
        .add_entry(entry, ParentContext::Equipment { equipment_id: f.equipment.ui_id })
        .unwrap();

    let err = f.tree.remove_equipment(f.equipment.ui_id).unwrap_err();
    assert!(matches!(err, ModelError::HasDependents { tasks: 1, entries: 1, .. }));
    assert!(f.tree.equipment(f.equipment.ui_id).is_ok());
}

#[test]
fn removing_task_keeps_its_entries() {
    let mut f = fixture();
    let entry = create_default_entry(&f.equipment, &f.task).unwrap();
    f.tree
        .add_entry(entry.clone(), ParentContext::Task { task_id: f.task.ui_id })
        .unwrap();

    f.tree.remove_task(f.task.ui_id).unwrap();
    assert!(f.tree.task(f.task.ui_id).is_err());
    assert!(f.tree.entry(entry.ui_id).is_ok());
    assert_eq!(f.tree.entries_of_equipment(f.equipment.ui_id).len(), 1);
}

#[test]
fn cascade_removes_children_first() {
    let mut f = fixture();
    f.tree
        .add_entry(
            create_default_entry(&f.equipment, &f.task).unwrap(),
            ParentContext::Task { task_id: f.task.ui_id },
        )
        .unwrap();
    f.tree
        .add_entry(
            create_default_orphan_entry(&f.equipment),
            ParentContext::Equipment { equipment_id: f.equipment.ui_id },
        )
        .unwrap();

    let removed = f.tree.remove_equipment_cascade(f.equipment.ui_id).unwrap();
    assert_eq!(removed.ui_id, f.equipment.ui_id);
    assert_eq!(f.tree.len(), 1);
    assert!(f.tree.user(f.user.ui_id).is_ok());
}

#[test]
fn user_owning_equipment_cannot_be_removed() {
    let mut f = fixture();
    let err = f.tree.remove_user(f.user.ui_id).unwrap_err();
    assert!(matches!(err, ModelError::HasChildren { equipments: 1, .. }));

    f.tree.remove_equipment_cascade(f.equipment.ui_id).unwrap();
    let removed = f.tree.remove_user(f.user.ui_id).unwrap();
    assert_eq!(removed.email, "skipper@example.com");
    assert!(f.tree.is_empty());
}

#[test]
fn remove_missing_entry_is_not_found() {
    let mut f = fixture();
    assert!(matches!(
        f.tree.remove_entry(UiId::new()),
        Err(ModelError::NotFound { kind: RecordKind::Entry, .. })
    ));
}
