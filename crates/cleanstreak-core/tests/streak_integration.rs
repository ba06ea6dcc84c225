//! Integration tests for the streak tracker against real storage.

use std::sync::Arc;

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use cleanstreak_core::{
    Category, CheckIn, Clock, Database, GoalDays, KeyValueStore, ManualClock, MemoryStore,
    StreakTracker,
};
use proptest::prelude::*;

fn clock_at(y: i32, m: u32, d: u32, h: u32) -> Arc<ManualClock> {
    let now = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap();
    Arc::new(ManualClock::new(now))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleanstreak.db");
    let clock = clock_at(2024, 1, 1, 9);

    {
        let db = Database::open_at(&path).unwrap();
        let mut tracker = StreakTracker::load(db, Arc::clone(&clock)).unwrap();
        tracker.select_category(Category::Smoking).unwrap();
        tracker.set_goal_days(60).unwrap();
        tracker.check_in_today(false).unwrap();
    }

    clock.advance(Duration::days(3));
    let db = Database::open_at(&path).unwrap();
    let mut tracker = StreakTracker::load(db, Arc::clone(&clock)).unwrap();
    assert_eq!(tracker.category(), Some(Category::Smoking));
    assert_eq!(tracker.goal_days().get(), 60);
    assert_eq!(tracker.days_since(), 3);
    assert_eq!(tracker.percent_complete(), 5);
    assert!(!tracker.checked_today());
    assert_eq!(
        tracker.check_in_for(date(2024, 1, 1)).unwrap(),
        Some(CheckIn { occurred: false })
    );

    // Same category again after restart keeps the original start.
    let start = tracker.streak_start();
    tracker.select_category(Category::Smoking).unwrap();
    assert_eq!(tracker.streak_start(), start);
}

#[test]
fn test_stored_layout_matches_keys() {
    let clock = clock_at(2024, 1, 1, 9);
    let mut tracker = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
    tracker.select_category(Category::Both).unwrap();
    tracker.check_in(date(2024, 1, 1), true).unwrap();
    tracker.check_in(date(2024, 1, 1), false).unwrap();

    let store = tracker.store();
    assert_eq!(store.get("addiction").unwrap().as_deref(), Some("\"both\""));
    assert_eq!(store.get("addiction_2024-01-01").unwrap().as_deref(), Some("true"));
    assert!(store.get("checked_2024-01-01").unwrap().is_some());
    assert!(store.get("goalDays").unwrap().is_none());
    let keys: Vec<&str> = store.keys().collect();
    assert_eq!(
        keys,
        vec!["addiction", "addiction_2024-01-01", "checked_2024-01-01", "startDate"]
    );
}

#[test]
fn test_corrupt_values_do_not_block_loading() {
    let mut store = MemoryStore::new();
    store.set("addiction", "smoking").unwrap();
    store.set("startDate", "null").unwrap();
    store.set("goalDays", "\"thirty\"").unwrap();
    store.set("checked_2024-01-01", "true").unwrap();
    store.set("addiction_2024-01-01", "maybe").unwrap();

    let clock = clock_at(2024, 1, 1, 12);
    let tracker = StreakTracker::load(store, clock).unwrap();
    assert_eq!(tracker.category(), None);
    assert_eq!(tracker.streak_start(), None);
    assert_eq!(tracker.goal_days(), GoalDays::DEFAULT);
    assert!(tracker.checked_today());
    assert!(!tracker.has_addiction_today());
}

#[test]
fn test_configured_default_goal_applies_until_set() {
    let clock = clock_at(2024, 1, 1, 12);
    let goal = GoalDays::new(10).unwrap();
    let mut tracker =
        StreakTracker::load_with_default_goal(MemoryStore::new(), Arc::clone(&clock), goal)
            .unwrap();
    tracker.select_category(Category::Drinking).unwrap();
    clock.advance(Duration::days(5));
    assert_eq!(tracker.percent_complete(), 50);

    tracker.set_goal_days(20).unwrap();
    assert_eq!(tracker.percent_complete(), 25);
}

#[test]
fn test_week_of_check_ins() {
    let clock = clock_at(2024, 3, 1, 20);
    let mut tracker = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
    tracker.select_category(Category::Drinking).unwrap();

    for day in 0..7 {
        let relapse = day == 3;
        tracker.check_in_today(relapse).unwrap();
        clock.advance(Duration::days(1));
        tracker.day_rollover().unwrap();
    }

    // Relapse on day index 3, then clean days 4..6; now is 4 days after the relapse.
    assert_eq!(tracker.days_since(), 4);
    let history = tracker
        .history(date(2024, 3, 1), date(2024, 3, 8))
        .unwrap();
    assert_eq!(history.len(), 8);
    assert_eq!(history.iter().filter(|d| d.checked).count(), 7);
    assert_eq!(history.iter().position(|d| d.occurred), Some(3));
    assert!(!history[7].checked);
    assert_eq!(tracker.today().date, clock.today());
}

#[test]
fn test_reload_sees_other_handle_on_same_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleanstreak.db");
    let clock = clock_at(2024, 1, 1, 9);

    let mut watcher =
        StreakTracker::load(Database::open_at(&path).unwrap(), Arc::clone(&clock)).unwrap();
    watcher.select_category(Category::Smoking).unwrap();
    clock.advance(Duration::days(5));

    let mut writer =
        StreakTracker::load(Database::open_at(&path).unwrap(), Arc::clone(&clock)).unwrap();
    writer.check_in_today(true).unwrap();
    writer.set_goal_days(45).unwrap();

    clock.advance(Duration::days(1));
    watcher.day_rollover().unwrap();
    // Rollover alone only refreshes today's record.
    assert_eq!(watcher.days_since(), 6);

    watcher.reload().unwrap();
    assert_eq!(watcher.days_since(), 1);
    assert_eq!(watcher.goal_days().get(), 45);
    assert_eq!(watcher.category(), Some(Category::Smoking));
    assert_eq!(watcher.today().date, date(2024, 1, 7));
    assert!(!watcher.checked_today());
    assert!(watcher.check_in_for(date(2024, 1, 6)).unwrap().is_some_and(|c| c.occurred));
}

proptest! {
    #[test]
    fn reselection_never_moves_start(picks in proptest::collection::vec(0usize..3, 1..12), gaps in proptest::collection::vec(0i64..5, 12)) {
        let clock = clock_at(2024, 1, 1, 9);
        let mut tracker = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
        let mut first_start = None;
        for (pick, gap) in picks.iter().zip(gaps.iter()) {
            tracker.select_category(Category::ALL[*pick]).unwrap();
            if first_start.is_none() {
                first_start = tracker.streak_start();
            }
            prop_assert_eq!(tracker.streak_start(), first_start);
            clock.advance(Duration::days(*gap));
        }
    }

    #[test]
    fn only_first_check_in_of_a_day_counts(first in any::<bool>(), second in any::<bool>(), hours in 0i64..10) {
        let clock = clock_at(2024, 1, 1, 9);
        let mut once = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
        let mut twice = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
        once.select_category(Category::Smoking).unwrap();
        twice.select_category(Category::Smoking).unwrap();

        clock.advance(Duration::hours(1));
        once.check_in_today(first).unwrap();
        twice.check_in_today(first).unwrap();
        clock.advance(Duration::hours(hours));
        twice.check_in_today(second).unwrap();

        prop_assert_eq!(once.state(), twice.state());
        prop_assert_eq!(once.today(), twice.today());
        let keys_once: Vec<&str> = once.store().keys().collect();
        let keys_twice: Vec<&str> = twice.store().keys().collect();
        prop_assert_eq!(keys_once, keys_twice);
    }

    #[test]
    fn clean_check_in_never_lowers_days(elapsed in 0i64..400) {
        let clock = clock_at(2024, 1, 1, 9);
        let mut tracker = StreakTracker::load(MemoryStore::new(), Arc::clone(&clock)).unwrap();
        tracker.select_category(Category::Both).unwrap();
        clock.advance(Duration::days(elapsed));
        let before = tracker.days_since();
        tracker.check_in_today(false).unwrap();
        prop_assert!(tracker.days_since() >= before);
        prop_assert!(tracker.percent_complete() <= 100);
    }
}
