use std::fs;

use assert_cmd::Command;
use predicates::{prelude::*, str::contains};
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetcraft_cli").unwrap();
    cmd.env("BUDGETCRAFT_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_runs_against_a_fresh_home() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .assert()
        .success()
        .stdout(contains("Income:").and(contains("Needs")).and(contains("Expenses: 7")));

    assert!(home.path().join("data").join("budgetcraft-income.json").exists());
}

#[test]
fn import_then_export_round_trips_through_the_cli() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in.csv");
    fs::write(
        &input,
        "date,description,amount,category,budgetCategory\n\
         2024-07-01,Bus pass,55,Transportation,Needs\n\
         2024-07-02,,10,Food,Needs\n",
    )
    .unwrap();

    cli(&home)
        .args(["import", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Imported 1 expenses (1 rows skipped)."));

    let output = home.path().join("out.csv");
    cli(&home)
        .args(["export", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Exported 8 expenses"));
    let exported = fs::read_to_string(&output).unwrap();
    assert!(exported.starts_with("date,description,amount,category,budgetCategory,notes"));
    assert!(exported.contains("Bus pass"));
}

#[test]
fn clear_persists_between_runs() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("clear")
        .assert()
        .success()
        .stdout(contains("Removed 7 expenses."));
    cli(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Expenses: 0"));
}

#[test]
fn unknown_commands_fail_with_usage() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("frobnicate")));
}

#[test]
fn version_prints_build_metadata() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
