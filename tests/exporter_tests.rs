// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use periodledger::commands::exporter;
use periodledger::models::NewTransaction;
use periodledger::period::Period;
use periodledger::{Ledger, cli};
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn ledger_with_rows(dir: &Path) -> Ledger {
    let mut ledger = Ledger::open_period(dir, Period::parse("2025January").unwrap()).unwrap();
    let checking = ledger.create_account("Checking").unwrap();
    let savings = ledger.create_account("Savings").unwrap();
    for (account_id, name, amount, day) in [
        (checking.id, "Coffee, large", -450, 3),
        (savings.id, "Interest", 12, 1),
        (checking.id, "Pay", 250000, 2),
    ] {
        ledger
            .store()
            .insert_transaction(&NewTransaction {
                name: name.to_string(),
                amount,
                transaction_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                account_id,
            })
            .unwrap();
    }
    ledger
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["periodledger", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", m)) => m.clone(),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_transactions_writes_csv_oldest_first() {
    let dir = tempdir().unwrap();
    let ledger = ledger_with_rows(dir.path());
    let out = dir.path().join("tx.csv");
    let m = export_matches(&["transactions", "--out", out.to_str().unwrap()]);
    exporter::handle(&ledger, &m).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "period,id,date,account,name,amount",
            "2025January,2,2025-01-01,Savings,Interest,0.12",
            "2025January,3,2025-01-02,Checking,Pay,2500.00",
            "2025January,1,2025-01-03,Checking,\"Coffee, large\",-4.50",
        ]
    );
}

#[test]
fn export_transactions_writes_pretty_json() {
    let dir = tempdir().unwrap();
    let ledger = ledger_with_rows(dir.path());
    let out = dir.path().join("tx.json");
    let m = export_matches(&["transactions", "--format", "JSON", "--out", out.to_str().unwrap()]);
    exporter::handle(&ledger, &m).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(
        value[0],
        json!({
            "period": "2025January",
            "id": 2,
            "date": "2025-01-01",
            "account": "Savings",
            "name": "Interest",
            "amount": "0.12"
        })
    );
}

#[test]
fn unknown_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let ledger = ledger_with_rows(dir.path());
    let out = dir.path().join("tx.xml");
    let m = export_matches(&["transactions", "--format", "xml", "--out", out.to_str().unwrap()]);
    let err = exporter::handle(&ledger, &m).unwrap_err();
    assert!(err.to_string().contains("Unknown format: xml"));
    assert!(!out.exists());
}
