//! End-to-end tests for the billbling binary
//!
//! Each test runs against its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn billbling(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("billbling").unwrap();
    cmd.env("BILLBLING_DATA_DIR", dir.path())
        .env_remove("BILLBLING_LOG");
    cmd
}

/// A group of three where Alice paid 120 and Bob paid 60, both split evenly
fn household() -> TempDir {
    let dir = TempDir::new().unwrap();

    billbling(&dir)
        .args(["init", "--name", "Maple Street"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created group 'Maple Street'"));

    for name in ["Alice", "Bob", "Carol"] {
        billbling(&dir)
            .args(["member", "add", name])
            .assert()
            .success();
    }

    billbling(&dir)
        .args(["bill", "add", "Groceries", "120", "--paid-by", "Alice", "-c", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split 3 ways, $40.00 each"));
    billbling(&dir)
        .args(["bill", "add", "Internet", "60", "--paid-by", "Bob"])
        .assert()
        .success();

    dir
}

#[test]
fn test_commands_require_init() {
    let dir = TempDir::new().unwrap();

    billbling(&dir)
        .args(["member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("billbling init"));
}

#[test]
fn test_init_twice_fails() {
    let dir = household();

    billbling(&dir)
        .args(["init", "--name", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_balance_plan() {
    let dir = household();

    billbling(&dir)
        .args(["balance", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Carol pays Alice $60.00"));
}

#[test]
fn test_balance_share_text() {
    let dir = household();

    billbling(&dir)
        .args(["balance", "share"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*BillBling Settlement Summary*"))
        .stdout(predicate::str::contains("Group: Maple Street"))
        .stdout(predicate::str::contains("- Carol owes Alice $60.00"));
}

#[test]
fn test_settle_up_clears_plan() {
    let dir = household();

    billbling(&dir)
        .args(["settle", "record", "Carol", "Alice", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded: Carol paid Alice $60.00"));

    billbling(&dir)
        .args(["balance", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All balances are settled."));

    billbling(&dir)
        .args(["balance", "share"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All balances are settled. Good job!"));
}

#[test]
fn test_unknown_payer_is_rejected() {
    let dir = household();

    billbling(&dir)
        .args(["bill", "add", "Pizza", "30", "--paid-by", "Dave"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member not found: Dave"));
}

#[test]
fn test_member_with_bills_cannot_be_removed() {
    let dir = household();

    billbling(&dir)
        .args(["member", "remove", "Bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenced by 2 bill(s)"));
}

#[test]
fn test_spending_report() {
    let dir = household();

    billbling(&dir)
        .args(["report", "spending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Other"))
        .stdout(predicate::str::contains("$180.00"));
}

#[test]
fn test_export_bills_csv() {
    let dir = household();
    let output = dir.path().join("bills.csv");

    billbling(&dir)
        .args(["export", "bills"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 bills"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("ID,Date,Description,Category,Paid By,Participants,Amount,Settlement"));
    assert!(contents.contains("Alice; Bob; Carol"));
}

#[test]
fn test_history_lists_changes() {
    let dir = household();

    billbling(&dir)
        .args(["history", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Bill"))
        .stdout(predicate::str::contains("Internet"));
}

#[test]
fn test_export_then_import_into_fresh_directory() {
    let dir = household();
    let backup = TempDir::new().unwrap();
    let output = backup.path().join("household.yaml");

    billbling(&dir)
        .args(["export", "all", "--format", "yaml"])
        .arg(&output)
        .assert()
        .success();

    let fresh = TempDir::new().unwrap();
    billbling(&fresh)
        .arg("import")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported group 'Maple Street'"))
        .stdout(predicate::str::contains("3 members, 2 bills"));

    billbling(&fresh)
        .args(["balance", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Carol pays Alice $60.00"));

    // The household directory already has a group
    billbling(&dir)
        .arg("import")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_oversized_amount_is_rejected() {
    let dir = household();

    billbling(&dir)
        .args(["bill", "add", "Yacht", "79228162514264337593543950335", "--paid-by", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}
