//! Integration tests for the full mark -> rollover -> reconcile flow
//! against an on-disk database.

use chrono::NaiveDate;
use goaltrack_core::storage::Database;
use goaltrack_core::{mark_completed_today, reconcile_daily, Goal};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn mark_and_reconcile_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("goaltrack.db");

    {
        let db = Database::open_at(&db_path).unwrap();
        let mut goal = Goal::new("dsa", 3);

        // Wednesday and Friday of the week of 2025-06-02.
        mark_completed_today(&mut goal, date(2025, 6, 4));
        mark_completed_today(&mut goal, date(2025, 6, 6));
        db.create_goal(&goal).unwrap();
    }

    // Reopen: schema migration must be a no-op and state must survive.
    let db = Database::open_at(&db_path).unwrap();
    let mut goal = db.get_goal_by_category("dsa").unwrap().unwrap();
    assert_eq!(goal.weekly_streak, 2);
    assert_eq!(goal.current_week_days_completed.indices(), vec![2, 4]);

    // Monday of the next week: tally restarts, best is retained.
    let update = mark_completed_today(&mut goal, date(2025, 6, 9));
    assert!(update.newly_marked);
    assert_eq!(update.current_week_days_completed.indices(), vec![0]);
    assert_eq!(update.weekly_streak, 2);
    goal.touch();
    db.update_goal(&goal).unwrap();

    // Two weeks of silence, then the daily reconcile runs.
    let mut goals = db.list_goals().unwrap();
    let summary = reconcile_daily(&mut goals, date(2025, 6, 24));
    assert_eq!(summary.goals_checked, 1);
    assert_eq!(summary.weeks_rolled, 1);
    for g in &goals {
        db.update_goal(g).unwrap();
    }

    let reloaded = db.get_goal_by_category("dsa").unwrap().unwrap();
    assert!(reloaded.current_week_days_completed.is_empty());
    assert_eq!(reloaded.weekly_streak, 2);
    assert_eq!(reloaded.streak_started_at, Some(date(2025, 6, 4)));
}

#[test]
fn reconcile_persists_every_goal_unconditionally() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("goaltrack.db")).unwrap();

    db.create_goal(&Goal::new("dsa", 3)).unwrap();
    db.create_goal(&Goal::new("job_search", 1)).unwrap();

    let mut goals = db.list_goals().unwrap();
    let summary = reconcile_daily(&mut goals, date(2025, 6, 10));
    assert_eq!(summary.goals_checked, 2);
    assert_eq!(summary.weeks_rolled, 0);

    // Both goals write back cleanly even though nothing changed.
    for g in &goals {
        db.update_goal(g).unwrap();
    }
    assert_eq!(db.list_goals().unwrap().len(), 2);
}
