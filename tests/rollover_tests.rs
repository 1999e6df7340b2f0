// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use periodledger::balance::available_balance;
use periodledger::db::Store;
use periodledger::models::{NewRecurring, NewTransaction};
use periodledger::period::Period;
use periodledger::rollover::{STARTING_BALANCE, Snapshot, seed};
use periodledger::{Ledger, LedgerError, cli, commands};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn march() -> Period {
    Period::parse("2024March").unwrap()
}

fn april() -> Period {
    Period::parse("2024April").unwrap()
}

fn record(ledger: &Ledger, account_id: i64, name: &str, amount: i64) {
    ledger
        .store()
        .insert_transaction(&NewTransaction {
            name: name.to_string(),
            amount,
            transaction_date: date(2024, 3, 10),
            account_id,
        })
        .unwrap();
}

fn add_recurring(ledger: &Ledger, account_id: i64, name: &str, amount: i64, day: u8) -> i64 {
    ledger
        .store()
        .insert_recurring(&NewRecurring {
            name: name.to_string(),
            amount,
            occurrence_day: day,
            account_id,
        })
        .unwrap()
        .id
}

fn open_march(dir: &Path) -> Ledger {
    Ledger::open_period(dir, march()).unwrap()
}

#[test]
fn open_starts_in_the_month_of_today() {
    let dir = tempdir().unwrap();
    let ledger = Ledger::open(dir.path(), date(2024, 3, 15)).unwrap();
    assert_eq!(ledger.period(), march());
    assert!(ledger.account_id().is_none());
    assert!(dir.path().join("2024March.db").exists());
}

#[test]
fn first_account_becomes_current() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let err = ledger.require_account().unwrap_err();
    assert!(err.is_validation());

    let first = ledger.create_account("Checking").unwrap();
    ledger.create_account("Savings").unwrap();
    assert_eq!(ledger.account_id(), Some(first.id));
}

#[test]
fn rollover_carries_balance_and_recurrings() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let account = ledger.create_account("Checking").unwrap();
    record(&ledger, account.id, "Pay", 20000);
    record(&ledger, account.id, "Groceries", -7655);
    let scratch = add_recurring(&ledger, account.id, "Scratch", -1, 2);
    let rent_id = add_recurring(&ledger, account.id, "Rent", -500, 1);
    ledger.store().delete_recurring(scratch).unwrap();

    let next = ledger.rollover(date(2024, 4, 1)).unwrap();
    assert_eq!(next, april());
    assert_eq!(ledger.period(), april());

    let store = ledger.store();
    let carried = store.get_account(account.id).unwrap();
    assert_eq!(carried.name, "Checking");
    assert_eq!(carried.total_available, 12345);

    let txs = store.list_transactions(account.id).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].name, STARTING_BALANCE);
    assert_eq!(txs[0].amount, 12345);
    assert_eq!(txs[0].transaction_date, date(2024, 4, 1));

    let recurrings = store.list_recurrings(account.id).unwrap();
    assert_eq!(recurrings.len(), 1);
    assert_eq!(recurrings[0].name, "Rent");
    assert_eq!(recurrings[0].amount, -500);
    assert_eq!(recurrings[0].occurrence_day, 1);
    assert_ne!(recurrings[0].id, rent_id);
}

#[test]
fn old_period_is_left_untouched() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let account = ledger.create_account("Checking").unwrap();
    record(&ledger, account.id, "Pay", 1000);
    ledger.rollover(date(2024, 4, 1)).unwrap();
    record(&ledger, account.id, "Coffee", -450);
    drop(ledger);

    let old = open_march(dir.path());
    let txs = old.store().list_transactions(account.id).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].name, "Pay");

    let reopened = Ledger::open(dir.path(), date(2024, 3, 20)).unwrap();
    assert_eq!(reopened.period(), april());
    assert_eq!(available_balance(reopened.store(), account.id).unwrap(), 550);
}

#[test]
fn rollover_keeps_the_selected_account_id() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    ledger.create_account("Checking").unwrap();
    let savings = ledger.create_account("Savings").unwrap();
    ledger.select_account(savings.id).unwrap();
    record(&ledger, savings.id, "Interest", 42);

    ledger.rollover(date(2024, 4, 1)).unwrap();
    let accounts = ledger.store().list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, savings.id);
    assert_eq!(accounts[0].total_available, 42);
}

#[test]
fn negative_balance_carries_as_negative_seed() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let account = ledger.create_account("Checking").unwrap();
    record(&ledger, account.id, "Rent", -2500);
    ledger.rollover(date(2024, 4, 1)).unwrap();
    assert_eq!(available_balance(ledger.store(), account.id).unwrap(), -2500);
}

#[test]
fn december_rolls_into_next_year() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open_period(dir.path(), Period::parse("2024December").unwrap()).unwrap();
    ledger.create_account("Checking").unwrap();
    let next = ledger.rollover(date(2025, 1, 1)).unwrap();
    assert_eq!(next.to_string(), "2025January");
    assert!(dir.path().join("2025January.db").exists());
}

#[test]
fn rollover_without_account_is_rejected() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let err = ledger.rollover(date(2024, 4, 1)).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.period(), march());
    assert!(!dir.path().join("2024April.db").exists());
}

#[test]
fn rollover_into_populated_period_fails_and_restores_source() {
    let dir = tempdir().unwrap();
    {
        let mut april_ledger = Ledger::open_period(dir.path(), april()).unwrap();
        april_ledger.create_account("Elsewhere").unwrap();
    }

    let mut ledger = open_march(dir.path());
    let account = ledger.create_account("Checking").unwrap();
    record(&ledger, account.id, "Pay", 1000);

    let err = ledger.rollover(date(2024, 4, 1)).unwrap_err();
    assert!(matches!(err, LedgerError::Rollover(_)));
    assert_eq!(ledger.period(), march());
    assert!(ledger.store().is_open());
    assert_eq!(available_balance(ledger.store(), account.id).unwrap(), 1000);

    // the pre-existing file is kept and left as it was
    let untouched = Ledger::open_period(dir.path(), april()).unwrap();
    let accounts = untouched.store().list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Elsewhere");
    assert_eq!(accounts[0].total_available, 0);
}

#[test]
fn failed_seed_commits_nothing() {
    let mut target = Store::open_in_memory().unwrap();
    let source = Store::open_in_memory().unwrap();
    let account = source.insert_account("Checking").unwrap();
    let mut snapshot = Snapshot::capture(&source, account.id).unwrap();
    snapshot.recurrings.push(periodledger::models::Recurring {
        id: 1,
        name: "Broken".to_string(),
        amount: -1,
        occurrence_day: 31,
        account_id: account.id,
        created_at: chrono::Utc::now(),
    });

    let err = seed(&mut target, &snapshot, date(2024, 4, 1)).unwrap_err();
    assert!(err.is_validation());
    assert!(!target.has_any_account().unwrap());
}

#[test]
fn separate_data_dirs_roll_over_independently() {
    let handles: Vec<_> = (0..2i64)
        .map(|n| {
            thread::spawn(move || {
                let dir = tempdir().unwrap();
                let mut ledger = open_march(dir.path());
                let account = ledger.create_account("Checking").unwrap();
                record(&ledger, account.id, "Pay", 100 * (n + 1));
                ledger.rollover(date(2024, 4, 1)).unwrap();
                available_balance(ledger.store(), account.id).unwrap()
            })
        })
        .collect();
    let totals: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(totals, vec![100, 200]);
}

#[test]
fn racing_rollovers_in_one_data_dir_publish_once() {
    for _ in 0..20 {
        let dir = tempdir().unwrap();
        let account_id = {
            let mut ledger = open_march(dir.path());
            let account = ledger.create_account("Checking").unwrap();
            record(&ledger, account.id, "Pay", 12345);
            account.id
        };

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let path = dir.path().to_path_buf();
                thread::spawn(move || {
                    let mut ledger = open_march(&path);
                    barrier.wait();
                    let result = ledger.rollover(date(2024, 4, 1));
                    let balance = available_balance(ledger.store(), account_id).unwrap();
                    (result, ledger.period(), balance)
                })
            })
            .collect();
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners = outcomes.iter().filter(|(r, _, _)| r.is_ok()).count();
        assert_eq!(winners, 1);
        for (result, period, balance) in &outcomes {
            match result {
                Ok(_) => assert_eq!(*period, april()),
                Err(err) => {
                    assert!(matches!(err, LedgerError::Rollover(_)), "{}", err);
                    assert_eq!(*period, march());
                }
            }
            assert_eq!(*balance, 12345);
        }

        assert!(dir.path().join("2024April.db").exists());
        let published = Ledger::open_period(dir.path(), april()).unwrap();
        let accounts = published.store().list_accounts().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].total_available, 12345);
        assert_eq!(published.store().list_transactions(account_id).unwrap().len(), 1);
        assert_eq!(file_names(dir.path()), vec!["2024April.db", "2024March.db"]);
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn failed_seed_leaves_no_next_period_file() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    let account = ledger.create_account("Checking").unwrap();
    record(&ledger, account.id, "Pay", 1000);

    // a blank name passes the old schema but not account validation
    let raw = rusqlite::Connection::open(dir.path().join("2024March.db")).unwrap();
    raw.execute("UPDATE accounts SET name='  ' WHERE id=?1", [account.id])
        .unwrap();
    drop(raw);

    let err = ledger.rollover(date(2024, 4, 1)).unwrap_err();
    assert!(matches!(err, LedgerError::Rollover(_)));
    assert_eq!(ledger.period(), march());
    assert!(ledger.store().is_open());
    assert_eq!(available_balance(ledger.store(), account.id).unwrap(), 1000);
    assert_eq!(file_names(dir.path()), vec!["2024March.db"]);
}

#[test]
fn unreadable_next_period_file_is_kept() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("2024April.db");
    let junk = vec![b'x'; 4096];
    fs::write(&target, &junk).unwrap();

    let mut ledger = open_march(dir.path());
    ledger.create_account("Checking").unwrap();
    let err = ledger.rollover(date(2024, 4, 1)).unwrap_err();
    assert!(matches!(err, LedgerError::Rollover(_)));
    assert_eq!(ledger.period(), march());
    assert!(ledger.store().has_any_account().unwrap());
    assert_eq!(fs::read(&target).unwrap(), junk);
}

#[test]
fn period_next_rolls_over_the_chosen_account() {
    let dir = tempdir().unwrap();
    let mut ledger = open_march(dir.path());
    ledger.create_account("Checking").unwrap();
    let savings = ledger.create_account("Savings").unwrap();
    record(&ledger, savings.id, "Interest", 42);

    let id = savings.id.to_string();
    let matches = cli::build_cli().get_matches_from([
        "periodledger",
        "period",
        "next",
        "--account",
        id.as_str(),
        "--date",
        "2024-04-01",
    ]);
    let (_, period_m) = matches.subcommand().unwrap();
    commands::periods::handle(&mut ledger, period_m).unwrap();

    assert_eq!(ledger.period(), april());
    let accounts = ledger.store().list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, savings.id);
    assert_eq!(accounts[0].name, "Savings");
    assert_eq!(accounts[0].total_available, 42);
}
