//! End-to-end flows through the SQLite-backed store.

use std::sync::Arc;
use std::thread;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use soultracker_core::{
    CheckinOutcome, Config, CoreError, Emotion, StoreError, Tracker, UserDb, UserStore,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open(dir: &TempDir) -> UserDb {
    UserDb::open_at(&dir.path().join("soultracker.db")).unwrap()
}

#[test]
fn week_of_use_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let joined = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let user_id = {
        let tracker = Tracker::new(open(&dir));
        let user = tracker.sign_up("sam@example.com", joined).unwrap();

        for day in 1..=3 {
            let login = tracker.log_in("sam@example.com", date(2024, 3, day)).unwrap();
            assert!(login.daily_checkin);
        }
        let msg = tracker
            .record_message(&user.id, "work has me so stressed", joined + Duration::days(2))
            .unwrap();
        assert_eq!(msg.emotion, Emotion::Anxiety);
        assert!(msg.booster.is_some());
        tracker.complete_booster(&user.id, None).unwrap();
        user.id
    };

    let tracker = Tracker::new(open(&dir));
    let user = tracker.store().get(&user_id).unwrap();
    assert_eq!(user.current_streak, 3);
    assert_eq!(user.points, 15 + 10);
    assert_eq!(user.boosters_completed, 1);
    assert_eq!(user.emotion_log.len(), 1);
    assert_eq!(user.last_checkin_date, Some(date(2024, 3, 3)));

    let gap = tracker.log_in("sam@example.com", date(2024, 3, 7)).unwrap();
    assert_eq!(gap.checkin.outcome, CheckinOutcome::Reset);
    assert_eq!(gap.user.current_streak, 1);
    assert_eq!(gap.user.points, 25);

    let summary = tracker.summary(&user_id, date(2024, 3, 7), 7).unwrap();
    assert_eq!(summary.moods.total, 1);
    assert_eq!(summary.moods.top_emotions[0].emotion, Emotion::Anxiety);
}

#[test]
fn leaderboard_across_users() {
    let dir = TempDir::new().unwrap();
    let tracker = Tracker::new(open(&dir));
    let now = Utc::now();

    let a = tracker.sign_up("a@example.com", now).unwrap();
    let b = tracker.sign_up("b@example.com", now).unwrap();
    tracker.sign_up("c@example.com", now).unwrap();
    tracker.complete_booster(&b.id, Some(40)).unwrap();
    tracker.complete_booster(&a.id, Some(20)).unwrap();

    let board = tracker.leaderboard(&a.id).unwrap();
    let emails: Vec<_> = board.top.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, ["b@example.com", "a@example.com", "c@example.com"]);
    assert!(board.top[1].is_current_user);
    assert_eq!(board.current_user.map(|e| e.rank), Some(2));
}

#[test]
fn duplicate_email_rejected_by_database() {
    let dir = TempDir::new().unwrap();
    let tracker = Tracker::new(open(&dir));
    tracker.sign_up("dup@example.com", Utc::now()).unwrap();
    assert!(matches!(
        tracker.sign_up("dup@example.com", Utc::now()),
        Err(CoreError::Store(StoreError::DuplicateEmail(_)))
    ));
}

#[test]
fn concurrent_checkins_for_one_user_award_once() {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(open(&dir));
    let tracker = Arc::new(Tracker::new(Arc::clone(&db)));
    let user = tracker.sign_up("race@example.com", Utc::now()).unwrap();
    let today = date(2024, 5, 1);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            let id = user.id.clone();
            thread::spawn(move || tracker.check_in(&id, today).unwrap().1.points_awarded)
        })
        .collect();
    let awarded: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(awarded, 5);
    let stored = db.get(&user.id).unwrap();
    assert_eq!(stored.points, 5);
    assert_eq!(stored.current_streak, 1);
}

#[test]
fn concurrent_boosters_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let tracker = Arc::new(Tracker::new(Arc::new(open(&dir))));
    let user = tracker.sign_up("busy@example.com", Utc::now()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            let id = user.id.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    tracker.complete_booster(&id, None).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let stored = tracker.store().get(&user.id).unwrap();
    assert_eq!(stored.points, 400);
    assert_eq!(stored.boosters_completed, 40);
}

#[test]
fn configured_tracker_over_database() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.apply("ledger.daily_bonus", "7").unwrap();
    config.apply("leaderboard.size", "1").unwrap();
    let tracker = Tracker::from_config(open(&dir), &config).unwrap();

    let a = tracker.sign_up("a@example.com", Utc::now()).unwrap();
    tracker.sign_up("b@example.com", Utc::now()).unwrap();
    tracker.log_in("a@example.com", date(2024, 1, 1)).unwrap();
    let second = tracker.log_in("a@example.com", date(2024, 1, 2)).unwrap();
    assert_eq!(second.checkin.points_awarded, 7);
    assert_eq!(second.user.points, 12);

    let board = tracker.leaderboard(&a.id).unwrap();
    assert_eq!(board.top.len(), 1);
}
