//! Integration tests for streak computation.
//!
//! Covers the documented edge cases end to end through `SavedSong` records,
//! plus property checks for duplicate collapse and run extension.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use stash_core::{compute_streak, History, SavedSong, StreakCalculator};

fn song(id: &str, created_at: &str) -> SavedSong {
    SavedSong::at(id, created_at)
}

fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

fn stamp(day: NaiveDate, hour: u32) -> String {
    day.and_hms_opt(hour, 0, 0).unwrap().and_utc().to_rfc3339()
}

#[test]
fn empty_history() {
    let history = History::default();
    assert_eq!(compute_streak(&history, instant("2024-01-10T12:00:00Z")), 0);
}

#[test]
fn gap_two_days_before_now_breaks_streak() {
    let history = History::new(vec![
        song("1", "2024-01-10T09:00:00Z"),
        song("2", "2024-01-09T09:00:00Z"),
        song("3", "2024-01-08T09:00:00Z"),
    ]);
    assert_eq!(compute_streak(&history, instant("2024-01-12T12:00:00Z")), 0);
}

#[test]
fn grace_window_late_in_the_day() {
    let history = History::new(vec![song("1", "2024-01-10T15:00:00Z")]);
    assert_eq!(compute_streak(&history, instant("2024-01-11T23:00:00Z")), 1);
}

#[test]
fn same_day_events_collapse() {
    let history = History::new(vec![
        song("1", "2024-01-10T00:05:00Z"),
        song("2", "2024-01-10T12:00:00Z"),
        song("3", "2024-01-10T23:55:00Z"),
    ]);
    assert_eq!(compute_streak(&history, instant("2024-01-10T23:59:00Z")), 1);
}

#[test]
fn three_day_run_then_middle_day_removed() {
    let now = instant("2024-03-03T12:00:00Z");
    let full = History::new(vec![
        song("a", "2024-03-01T08:00:00Z"),
        song("b", "2024-03-02T08:00:00Z"),
        song("c", "2024-03-03T08:00:00Z"),
    ]);
    assert_eq!(compute_streak(&full, now), 3);

    let without_middle: Vec<SavedSong> = full
        .iter()
        .filter(|s| s.id != "b")
        .cloned()
        .collect();
    assert_eq!(compute_streak(&without_middle, now), 1);
}

#[test]
fn malformed_timestamps_never_count_as_epoch() {
    let now = instant("1970-01-02T06:00:00Z");
    let history = History::new(vec![
        SavedSong::default(),
        song("bad", "Invalid Date"),
        song("empty", ""),
        song("zero", "0"),
    ]);
    // If any of these were coerced to 1970-01-01, yesterday would be covered.
    assert_eq!(compute_streak(&history, now), 0);
    assert_eq!(StreakCalculator::new().covered_days(&history).skipped(), 4);
}

#[test]
fn non_string_timestamp_does_not_sink_the_history() {
    let history = History::from_json(
        r#"[{"id": "1", "created_at": "2024-01-10T09:00:00Z"},
            {"id": "2", "created_at": 1704844800},
            {"id": "3", "created_at": {"at": "2024-01-09"}}]"#,
    )
    .unwrap();
    let summary = StreakCalculator::new().summarize(&history, instant("2024-01-10T12:00:00Z"));
    assert_eq!(summary.current, 1);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn history_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(
        &path,
        r#"{"history": [
            {"id": "1", "song": "Dreams", "artist": "Fleetwood Mac", "source": "tiktok",
             "album_art_url": "", "created_at": "2024-05-20T21:14:00.000Z"},
            {"id": "2", "song": "Kiss Me More", "artist": "Doja Cat", "source": "instagram",
             "album_art_url": "", "created_at": "2024-05-21 07:02:11+00"},
            {"id": "3", "song": "Unknown", "artist": "", "source": "youtube", "album_art_url": ""}
        ]}"#,
    )
    .unwrap();

    let history = History::load(&path).unwrap();
    let summary = StreakCalculator::new().summarize(&history, instant("2024-05-22T10:00:00Z"));
    assert_eq!(summary.current, 2);
    assert_eq!(summary.longest, 2);
    assert_eq!(summary.skipped, 1);
}

fn today_of(now_secs: i64) -> (DateTime<Utc>, NaiveDate) {
    let now = Utc.timestamp_opt(now_secs, 0).unwrap();
    (now, now.date_naive())
}

proptest! {
    #[test]
    fn empty_is_zero_for_any_now(now_secs in 0i64..4_102_444_800) {
        let (now, _) = today_of(now_secs);
        let none: Vec<SavedSong> = Vec::new();
        prop_assert_eq!(compute_streak(&none, now), 0);
    }

    #[test]
    fn duplicates_on_covered_days_change_nothing(
        now_secs in 946_684_800i64..4_102_444_800,
        back in prop::collection::vec(0i64..20, 0..15),
        dup_picks in prop::collection::vec((any::<prop::sample::Index>(), 0u32..24), 1..10),
    ) {
        let (now, today) = today_of(now_secs);
        let days: Vec<NaiveDate> = back.iter().map(|b| today - Duration::days(*b)).collect();
        let mut history: Vec<String> = days.iter().map(|d| stamp(*d, 12)).collect();
        let before = compute_streak(&history, now);

        if !days.is_empty() {
            for (idx, hour) in &dup_picks {
                history.push(stamp(days[idx.index(days.len())], *hour));
            }
        }
        prop_assert_eq!(compute_streak(&history, now), before);
    }

    #[test]
    fn adding_the_day_before_the_run_extends_it(
        now_secs in 946_684_800i64..4_102_444_800,
        run in 1i64..30,
        older in prop::collection::vec(3i64..40, 0..10),
    ) {
        let (now, today) = today_of(now_secs);
        let start = today - Duration::days(run - 1);
        let mut history: Vec<String> = (0..run)
            .map(|i| stamp(today - Duration::days(i), 9))
            .collect();
        // Older activity never touches the two days before the run.
        history.extend(older.iter().map(|o| stamp(start - Duration::days(*o), 9)));

        let k = compute_streak(&history, now);
        prop_assert_eq!(k, run as u32);

        history.push(stamp(start - Duration::days(1), 18));
        prop_assert_eq!(compute_streak(&history, now), k + 1);
    }
}
