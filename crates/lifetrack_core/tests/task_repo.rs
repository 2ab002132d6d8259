use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lifetrack_core::{
    DateRange, FixedClock, NewTask, RepoError, Storage, StorageKey, Task, TaskFilter, TaskPatch,
    TaskPriority, TaskRepository, TaskStatus, ValidationError,
};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap()
}

fn tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn ship_release() -> NewTask {
    NewTask {
        title: "Ship release".to_string(),
        description: String::new(),
        status: TaskStatus::NotStarted,
        priority: TaskPriority::High,
        due_date: Some(tomorrow()),
    }
}

#[test]
fn add_assigns_id_and_created_at_and_keeps_fields_verbatim() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);

    let added = repo.add(ship_release()).unwrap();

    assert_eq!(repo.len(), 1);
    let stored = &repo.all()[0];
    assert_eq!(stored, &added);
    assert_eq!(stored.created_at, now());
    assert_eq!(stored.title, "Ship release");
    assert_eq!(stored.status, TaskStatus::NotStarted);
    assert_eq!(stored.priority, TaskPriority::High);
    assert_eq!(stored.due_date, Some(tomorrow()));

    let persisted: Vec<Task> = store.get(StorageKey::Tasks).unwrap();
    assert_eq!(persisted, vec![added]);
}

#[test]
fn add_prepends_newest_first() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);

    let first = repo.add(NewTask::new("first")).unwrap();
    let second = repo.add(NewTask::new("second")).unwrap();

    let ids: Vec<Uuid> = repo.all().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn add_rejects_past_due_date_without_changes() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);

    let mut draft = ship_release();
    draft.due_date = NaiveDate::from_ymd_opt(2026, 10, 14);
    let err = repo.add(draft).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::DateInPast { .. })
    ));
    assert!(repo.is_empty());
    assert_eq!(store.get::<Vec<Task>>(StorageKey::Tasks), None);
}

#[test]
fn update_with_empty_patch_preserves_record() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);
    let added = repo.add(ship_release()).unwrap();

    clock.advance(Duration::hours(3));
    let updated = repo.update(added.id, TaskPatch::default()).unwrap();

    assert_eq!(updated, added);
}

#[test]
fn update_merges_patch_and_validates_merged_record() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);
    let added = repo.add(ship_release()).unwrap();

    let updated = repo
        .update(
            added.id,
            TaskPatch {
                status: Some(TaskStatus::InProgress),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "Ship release");
    assert_eq!(updated.created_at, added.created_at);

    let err = repo
        .update(
            added.id,
            TaskPatch {
                title: Some(" ".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, RepoError::Validation(ValidationError::EmptyTitle));
    assert_eq!(repo.get(added.id).unwrap().title, "Ship release");
    let persisted: Vec<Task> = store.get(StorageKey::Tasks).unwrap();
    assert_eq!(persisted[0].status, TaskStatus::InProgress);
}

#[test]
fn update_unknown_id_is_not_found() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);

    let missing = Uuid::new_v4();
    let err = repo
        .update(
            missing,
            TaskPatch {
                title: Some(String::new()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
}

#[test]
fn overdue_task_can_still_be_edited() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);
    let added = repo.add(ship_release()).unwrap();

    clock.advance(Duration::days(5));
    let updated = repo
        .update(
            added.id,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.due_date, Some(tomorrow()));
    assert_eq!(updated.status, TaskStatus::Completed);
}

#[test]
fn delete_is_idempotent() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);
    let keep = repo.add(NewTask::new("keep")).unwrap();
    let gone = repo.add(NewTask::new("gone")).unwrap();

    assert!(repo.delete(gone.id));
    let after_once = repo.all().to_vec();
    assert!(!repo.delete(gone.id));

    assert_eq!(repo.all(), after_once.as_slice());
    assert_eq!(repo.all(), &[keep.clone()]);
    assert_eq!(store.get::<Vec<Task>>(StorageKey::Tasks), Some(vec![keep]));
}

#[test]
fn search_filters_by_text_priority_status_and_due_range() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);

    let mut undated = NewTask::new("Write release notes");
    undated.priority = TaskPriority::High;
    repo.add(undated).unwrap();

    let mut late = ship_release();
    late.due_date = NaiveDate::from_ymd_opt(2026, 12, 1);
    repo.add(late).unwrap();

    repo.add(ship_release()).unwrap();
    repo.add(NewTask::new("Buy milk")).unwrap();

    assert_eq!(repo.search("", TaskFilter::default()).len(), 4);
    assert_eq!(repo.search("release", TaskFilter::default()).len(), 3);

    let filter = TaskFilter {
        priorities: [TaskPriority::High].into_iter().collect(),
        due: Some(DateRange::between(tomorrow(), tomorrow() + Duration::days(7)).unwrap()),
        ..TaskFilter::default()
    };
    let titles: Vec<String> = repo
        .search("release", filter)
        .iter()
        .map(|task| task.title.clone())
        .collect();
    assert_eq!(titles, vec!["Ship release", "Write release notes"]);
}

#[test]
fn search_runs_against_full_collection_and_survives_updates() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = TaskRepository::load(&store, &clock);
    let milk = repo.add(NewTask::new("Buy milk")).unwrap();
    repo.add(NewTask::new("Buy bread")).unwrap();

    assert_eq!(repo.search("milk", TaskFilter::default()).len(), 1);
    assert_eq!(repo.search("bread", TaskFilter::default()).len(), 1);

    repo.update(
        milk.id,
        TaskPatch {
            title: Some("Buy bread and milk".to_string()),
            ..TaskPatch::default()
        },
    )
    .unwrap();
    assert_eq!(repo.filtered().len(), 2);

    repo.add(NewTask::new("Call mom")).unwrap();
    assert_eq!(repo.filtered().len(), 3);
}

#[test]
fn load_reads_existing_collection() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    {
        let mut repo = TaskRepository::load(&store, &clock);
        repo.add(ship_release()).unwrap();
    }

    let repo = TaskRepository::load(&store, &clock);
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.filtered().len(), 1);
    assert_eq!(repo.all()[0].due_date, Some(tomorrow()));
}

#[test]
fn due_date_check_uses_local_calendar_date() {
    let store = Storage::in_memory();
    // 02:00 UTC on the 15th is still the evening of the 14th west of UTC.
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 15, 2, 0, 0).unwrap());
    let local_today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    clock.set_today(local_today);
    let mut repo = TaskRepository::load(&store, &clock);

    let due_today = NewTask {
        due_date: Some(local_today),
        ..NewTask::new("Call the bank")
    };
    let task = repo.add(due_today).unwrap();
    assert_eq!(task.due_date, Some(local_today));

    let yesterday = NewTask {
        due_date: local_today.pred_opt(),
        ..NewTask::new("Too late")
    };
    assert!(matches!(
        repo.add(yesterday),
        Err(RepoError::Validation(ValidationError::DateInPast { today, .. })) if today == local_today
    ));
}
