//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `data_dir` as the Stash data directory.
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stash-cli"))
        .args(args)
        .env("STASH_DATA_DIR", data_dir)
        .env_remove("STASH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn write_history(dir: &Path, stamps: &[&str]) -> String {
    let songs: Vec<serde_json::Value> = stamps
        .iter()
        .enumerate()
        .map(|(i, at)| {
            serde_json::json!({
                "id": i.to_string(),
                "song": format!("Track {i}"),
                "artist": "Various",
                "source": "tiktok",
                "album_art_url": "",
                "created_at": at,
            })
        })
        .collect();
    let path = dir.join("history.json");
    std::fs::write(&path, serde_json::to_string(&songs).unwrap()).unwrap();
    path.display().to_string()
}

#[test]
fn test_streak_plain() {
    let dir = tempfile::tempdir().unwrap();
    let history = write_history(
        dir.path(),
        &["2024-03-01T08:00:00Z", "2024-03-02T08:00:00Z", "2024-03-03T08:00:00Z"],
    );
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["streak", "--history", &history, "--now", "2024-03-03T12:00:00Z"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_streak_json_with_grace_window() {
    let dir = tempfile::tempdir().unwrap();
    let history = write_history(dir.path(), &["2024-01-10T15:00:00Z", "garbage"]);
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["streak", "--history", &history, "--now", "2024-01-11T23:00:00Z", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["streak"], 1);
    assert_eq!(parsed["today"], "2024-01-11");
}

#[test]
fn test_streak_respects_configured_offset() {
    let dir = tempfile::tempdir().unwrap();
    // 23:30 UTC on the 9th is the 10th at +01:00; with UTC days there is a
    // two-day gap to the 12th, with +01:00 the 10th is covered.
    let history = write_history(dir.path(), &["2024-01-09T23:30:00Z"]);
    let args = ["streak", "--history", history.as_str(), "--now", "2024-01-11T12:00:00Z"];

    let (_, stdout, _) = run_cli(dir.path(), &args);
    assert_eq!(stdout.trim(), "0");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "streak.utc_offset_minutes", "60"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &args);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    let history = write_history(dir.path(), &["2024-03-02T08:00:00Z", "2024-03-03T08:00:00Z"]);
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["stats", "--history", &history, "--now", "2024-03-03T20:00:00Z"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_songs"], 2);
    assert_eq!(parsed["streak"]["current"], 2);
    assert_eq!(parsed["next_achievement"]["id"], "collector");
}

#[test]
fn test_achievements_check_announces_once() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["achievements", "check", "--total", "10"]);
    assert_eq!(code, 0);
    let first: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert!(dir.path().join("achievements.json").exists());

    let (code, stdout, _) = run_cli(dir.path(), &["achievements", "check", "--total", "10"]);
    assert_eq!(code, 0);
    let second: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(second.as_array().unwrap().is_empty());
}

#[test]
fn test_achievements_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["achievements", "list", "--total", "5"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[1]["percent"], 50);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "log_level"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "warn");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "streak.utc_offset_minutes", "-300"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "streak.utc_offset_minutes"]);
    assert_eq!(stdout.trim(), "-300");
}

#[test]
fn test_missing_history_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json").display().to_string();
    let (code, _, stderr) = run_cli(dir.path(), &["streak", "--history", &missing]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_bad_now_fails() {
    let dir = tempfile::tempdir().unwrap();
    let history = write_history(dir.path(), &[]);
    let (code, _, stderr) = run_cli(dir.path(), &["streak", "--history", &history, "--now", "tomorrow"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid timestamp"));
}

#[test]
fn test_invalid_config_is_reported_not_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[streak]\nutc_offset_minutes = 5000\n",
    )
    .unwrap();
    let history = write_history(dir.path(), &["2024-01-10T09:00:00Z"]);

    for args in [
        vec!["streak", "--history", history.as_str(), "--now", "2024-01-11T12:00:00Z"],
        vec!["stats", "--history", history.as_str(), "--now", "2024-01-11T12:00:00Z"],
        vec!["achievements", "check", "--total", "1"],
    ] {
        let (code, stdout, stderr) = run_cli(dir.path(), &args);
        assert_eq!(code, 1, "{args:?} should fail on a broken config");
        assert!(stdout.is_empty());
        assert!(stderr.contains("error:"));
        assert!(stderr.contains("5000"), "stderr was: {stderr}");
    }
    assert!(!dir.path().join("achievements.json").exists());
}
