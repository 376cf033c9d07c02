use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

fn ledger(data_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BUDGET_LEDGER_FILE")
        .arg("--data-file")
        .arg(data_file);
    cmd
}

fn seed(data_file: &Path) {
    ledger(data_file)
        .args(["add-income", "--date", "01-15-2024", "--amount", "1500.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction 1"));
    ledger(data_file)
        .args([
            "add-expense",
            "--date",
            "01-16-2024",
            "--amount",
            "23.45",
            "--category",
            "Dining",
            "--note",
            "lunch",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction 2"));
}

#[test]
fn test_add_and_summarize() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    seed(&data_file);

    ledger(&data_file)
        .args(["summary", "--month", "All"])
        .assert()
        .success()
        .stdout("month,income,expense,balance\nAll,1500.00,23.45,1476.55\n");

    ledger(&data_file)
        .arg("months")
        .assert()
        .success()
        .stdout("All\n01-2024\n");

    let saved = fs::read_to_string(&data_file).unwrap();
    assert_eq!(
        saved,
        "date,type,amount,category,note\n\
         01-15-2024,Income,1500.00,Income,\n\
         01-16-2024,Expense,23.45,Dining,lunch\n"
    );
}

#[test]
fn test_delete_income() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    seed(&data_file);

    ledger(&data_file)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 transaction(s)"));

    ledger(&data_file)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("01-2024,0.00,23.45,-23.45"));
}

#[test]
fn test_invalid_amount_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");

    ledger(&data_file)
        .args(["add-income", "--date", "01-15-2024", "--amount", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Rejected: Invalid amount"));
    assert!(!data_file.exists());

    ledger(&data_file)
        .args(["add-income", "--date", "02-30-2024", "--amount", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date"));

    ledger(&data_file)
        .args(["add-income", "--date", "01-15-24", "--amount", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date"));
    assert!(!data_file.exists());
}

#[test]
fn test_edit_to_income_resets_category() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    seed(&data_file);

    ledger(&data_file)
        .args(["edit", "2", "--type", "income", "--category", "Dining"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction 2"));

    ledger(&data_file)
        .args(["list", "--month", "All"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2,01-16-2024,Income,23.45,Income,lunch"));
}

#[test]
fn test_edit_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    seed(&data_file);

    ledger(&data_file)
        .args(["edit", "9", "--amount", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No transaction with id 9"));
}

#[test]
fn test_list_navigates_months() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    seed(&data_file);
    ledger(&data_file)
        .args(["add-expense", "--date", "12-31-2023", "--amount", "9.99"])
        .assert()
        .success();

    ledger(&data_file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("12-31-2023").not())
        .stdout(predicate::str::contains("01-16-2024"));

    ledger(&data_file)
        .args(["list", "--step", "prev"])
        .assert()
        .success()
        .stdout(
            "id,date,type,amount,category,note\n3,12-31-2023,Expense,9.99,Groceries,\n",
        );

    ledger(&data_file)
        .args(["summary", "--month", "12-2023", "--step", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("01-2024,1500.00,23.45,1476.55"));
}

#[test]
fn test_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("nothing_here.csv");

    ledger(&data_file)
        .arg("months")
        .assert()
        .success()
        .stdout("All\n");
    ledger(&data_file)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("All,0.00,0.00,0.00"));
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("budget_data.csv");
    fs::write(
        &data_file,
        "date,type,amount,category,note\n01-15-2024,Income,lots,Income,\n",
    )
    .unwrap();

    ledger(&data_file)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to read ledger"));
}
