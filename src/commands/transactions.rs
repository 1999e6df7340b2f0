// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_account;
use crate::balance::available_balance;
use crate::models::{NewTransaction, Transaction};
use crate::money::{format_amount, parse_amount};
use crate::rollover::Ledger;
use crate::utils::{date_or_today, json_flags, maybe_print_json, parse_id, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => {
            let t = record(ledger, sub, false)?;
            println!("Deposited {} '{}' (id {})", format_amount(t.amount), t.name, t.id);
        }
        Some(("debit", sub)) => {
            let t = record(ledger, sub, true)?;
            println!("Debited {} '{}' (id {})", format_amount(t.amount), t.name, t.id);
        }
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let t = ledger.store().get_transaction(id)?;
            ledger.store().delete_transaction(id)?;
            let balance = available_balance(ledger.store(), t.account_id)?;
            println!(
                "Deleted transaction {}; available {}",
                id,
                format_amount(balance)
            );
        }
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Deposits are stored positive and debits negative, whatever sign was typed.
pub fn record(ledger: &Ledger, sub: &clap::ArgMatches, debit: bool) -> Result<Transaction> {
    let account_id = resolve_account(ledger, sub)?;
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?.abs();
    let transaction_date = date_or_today(sub)?;
    let t = ledger.store().insert_transaction(&NewTransaction {
        name: name.to_string(),
        amount: if debit { -amount } else { amount },
        transaction_date,
        account_id,
    })?;
    Ok(t)
}

fn edit(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let mut t = ledger.store().get_transaction(id)?;
    if let Some(name) = sub.get_one::<String>("name") {
        t.name = name.to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        t.amount = edited_amount(t.amount, parse_amount(amount)?);
    }
    let t = ledger.store().update_transaction(&t)?;
    println!(
        "Updated transaction {}: '{}' {}",
        t.id,
        t.name,
        format_amount(t.amount)
    );
    Ok(())
}

/// A typed amount keeps the entry's direction unless it is itself negative:
/// editing a debit to `7` gives `-7`, editing a deposit to `-7` gives `-7`.
pub fn edited_amount(stored: i64, typed: i64) -> i64 {
    if typed < 0 || stored >= 0 {
        typed
    } else {
        -typed
    }
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.name.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Date", "Amount", "Name"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub name: String,
    pub amount: String,
    pub cents: i64,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id,
            date: t.transaction_date.to_string(),
            name: t.name.clone(),
            amount: format_amount(t.amount),
            cents: t.amount,
        }
    }
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let account_id = resolve_account(ledger, sub)?;
    let mut rows: Vec<TransactionRow> = ledger
        .store()
        .list_transactions(account_id)?
        .iter()
        .map(TransactionRow::from)
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
