//! Integration tests for the caltrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging and removing meals and workouts
//! - Balance rendering
//! - Persistence across invocations
//! - Reset semantics

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("caltrack"))
}

/// Pull the id of the first entry out of a persisted list record
fn read_first_id(list_path: &Path) -> String {
    let raw = fs::read_to_string(list_path).expect("Failed to read list record");
    let items: serde_json::Value = serde_json::from_str(&raw).expect("List record is not JSON");
    items[0]["id"]
        .as_str()
        .expect("Entry has no id")
        .to_string()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily calorie balance tracking"));
}

#[test]
fn test_default_command_shows_balance_with_defaults() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DAILY CALORIE BALANCE"))
        .stdout(predicate::str::contains("2000 kcal"));
}

#[test]
fn test_add_meal_persists_records() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Eggs"))
        .stdout(predicate::str::contains("Meal logged"));

    assert_eq!(
        fs::read_to_string(data_dir.join("calorie-total")).unwrap(),
        "300"
    );
    let meal_list = fs::read_to_string(data_dir.join("meal-list")).unwrap();
    assert!(meal_list.contains("Eggs"));
}

#[test]
fn test_balance_reflects_meals_and_workouts() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();
    cli()
        .args(["add-workout", "Run", "200", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged"));

    cli()
        .args(["status", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Consumed      300 kcal"))
        .stdout(predicate::str::contains("Burned        200 kcal"))
        .stdout(predicate::str::contains("Net total     100 kcal"))
        .stdout(predicate::str::contains("Remaining    1900 kcal"));
}

#[test]
fn test_remove_meal_restores_balance() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    let id = read_first_id(&data_dir.join("meal-list"));
    cli()
        .args(["remove-meal", &id, "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(data_dir.join("calorie-total")).unwrap(),
        "0"
    );
    assert_eq!(
        fs::read_to_string(data_dir.join("meal-list")).unwrap(),
        "[]"
    );
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args([
            "remove-meal",
            "00000000-0000-0000-0000-000000000000",
            "--data-dir",
        ])
        .arg(data_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(data_dir.join("calorie-total")).unwrap(),
        "300"
    );
}

#[test]
fn test_limit_persists_across_invocations() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["limit", "1800", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily limit updated"));

    assert_eq!(
        fs::read_to_string(data_dir.join("daily-limit")).unwrap(),
        "1800"
    );

    cli()
        .args(["status", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit        1800 kcal"));
}

#[test]
fn test_reset_clears_day_but_keeps_persisted_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["limit", "1800", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();
    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["reset", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Day reset"));

    assert!(!data_dir.join("calorie-total").exists());
    assert!(!data_dir.join("meal-list").exists());
    assert!(data_dir.join("daily-limit").exists());

    // A reload still sees the old limit
    cli()
        .args(["status", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit        1800 kcal"));
}

#[test]
fn test_reset_clear_limit_flag() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["limit", "1800", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["reset", "--clear-limit", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    assert!(!data_dir.join("daily-limit").exists());

    cli()
        .args(["status", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit        2000 kcal"));
}

#[test]
fn test_list_shows_all_items() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();
    cli()
        .args(["add-workout", "Run", "200", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["list", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Eggs"))
        .stdout(predicate::str::contains("Run"));
}

#[test]
fn test_list_filter_matches_by_name() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "Scrambled Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();
    cli()
        .args(["add-workout", "Morning Run", "200", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["list", "--filter", "eggs", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scrambled Eggs"))
        .stdout(predicate::str::contains("Morning Run").not());
}

#[test]
fn test_list_empty_day() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["list", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing logged yet"));
}

#[test]
fn test_blank_meal_name_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["add-meal", "   ", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    // Nothing was written
    assert!(!data_dir.join("meal-list").exists());
    assert!(!data_dir.join("calorie-total").exists());
}

#[test]
fn test_corrupt_list_record_fails_loudly() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::create_dir_all(data_dir).unwrap();
    fs::write(data_dir.join("meal-list"), "{ invalid json }").unwrap();

    cli()
        .args(["add-meal", "Eggs", "300", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_corrupt_total_record_fails_loudly() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::create_dir_all(data_dir).unwrap();
    fs::write(data_dir.join("calorie-total"), "banana").unwrap();

    cli()
        .args(["status", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
}
