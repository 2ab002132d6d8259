use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lifetrack_core::{
    FixedClock, Goal, GoalFilter, GoalPatch, GoalRepository, GoalStatus, NewGoal,
    ProgressRange, RepoError, Storage, StorageKey, ValidationError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap()
}

fn learn_x(progress: i32) -> NewGoal {
    NewGoal {
        progress,
        ..NewGoal::new("Learn X")
    }
}

#[test]
fn progress_out_of_range_is_rejected_then_valid_progress_is_stored() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);

    let err = repo.add(learn_x(150)).unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(ValidationError::ProgressOutOfRange(150))
    );
    assert!(repo.is_empty());

    let goal = repo.add(learn_x(50)).unwrap();
    assert_eq!(goal.progress, 50);
    assert_eq!(repo.all()[0].progress, 50);
    assert_eq!(goal.created_at, now());
}

#[test]
fn update_cannot_push_progress_out_of_range() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);
    let goal = repo.add(learn_x(10)).unwrap();

    for bad in [-1, 101] {
        let err = repo
            .update(
                goal.id,
                GoalPatch {
                    progress: Some(bad),
                    ..GoalPatch::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, RepoError::Validation(ValidationError::ProgressOutOfRange(bad)));
    }

    assert_eq!(repo.get(goal.id).unwrap().progress, 10);
    let persisted: Vec<Goal> = store.get(StorageKey::Goals).unwrap();
    assert_eq!(persisted[0].progress, 10);
}

#[test]
fn partial_update_keeps_milestones_and_created_at() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);
    let goal = repo
        .add(NewGoal {
            milestones: vec!["read book".to_string(), "build demo".to_string()],
            deadline: NaiveDate::from_ymd_opt(2027, 1, 1),
            ..NewGoal::new("Learn Rust")
        })
        .unwrap();

    clock.advance(Duration::days(1));
    let updated = repo
        .update(
            goal.id,
            GoalPatch {
                status: Some(GoalStatus::OnHold),
                ..GoalPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, GoalStatus::OnHold);
    assert_eq!(updated.milestones, goal.milestones);
    assert_eq!(updated.created_at, goal.created_at);
    assert_eq!(updated.deadline, goal.deadline);
}

#[test]
fn past_deadline_is_rejected_on_add() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);

    let err = repo
        .add(NewGoal {
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..NewGoal::new("Too late")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::DateInPast { field: "deadline", .. })
    ));
}

#[test]
fn search_matches_milestones_and_filters_status_and_progress() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);
    repo.add(NewGoal {
        milestones: vec!["Sub-4 marathon".to_string()],
        progress: 20,
        status: GoalStatus::InProgress,
        ..NewGoal::new("Running")
    })
    .unwrap();
    repo.add(NewGoal {
        progress: 90,
        status: GoalStatus::InProgress,
        ..NewGoal::new("Reading")
    })
    .unwrap();
    repo.add(NewGoal {
        progress: 100,
        status: GoalStatus::Completed,
        ..NewGoal::new("Marathon training")
    })
    .unwrap();

    assert_eq!(repo.search("marathon", GoalFilter::default()).len(), 2);

    let filter = GoalFilter {
        statuses: [GoalStatus::InProgress].into_iter().collect(),
        progress: Some(ProgressRange::new(50, 100).unwrap()),
        ..GoalFilter::default()
    };
    let result = repo.search("", filter);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "Reading");

    assert_eq!(repo.average_progress(), Some(70.0));
}

#[test]
fn empty_patch_preserves_every_field() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);
    let goal = repo
        .add(NewGoal {
            description: "weekly".to_string(),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
            milestones: vec!["5k".to_string(), "10k".to_string()],
            status: GoalStatus::InProgress,
            ..learn_x(30)
        })
        .unwrap();

    clock.advance(Duration::days(3));
    let updated = repo.update(goal.id, GoalPatch::default()).unwrap();

    assert_eq!(updated, goal);
    assert_eq!(repo.get(goal.id), Some(&goal));
}

#[test]
fn delete_is_idempotent() {
    let store = Storage::in_memory();
    let clock = FixedClock::new(now());
    let mut repo = GoalRepository::load(&store, &clock);
    let keep = repo.add(learn_x(10)).unwrap();
    let gone = repo.add(learn_x(20)).unwrap();

    assert!(repo.delete(gone.id));
    assert!(!repo.delete(gone.id));

    assert_eq!(repo.all(), &[keep.clone()]);
    assert_eq!(store.get::<Vec<Goal>>(StorageKey::Goals), Some(vec![keep]));
}
