// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented interactive front end: `1` debit, `2` deposit, `d` delete, `q` quit.

use crate::balance::{available_balance, spendable};
use crate::models::{NewTransaction, Transaction};
use crate::money::{format_currency, parse_amount};
use crate::rollover::Ledger;
use anyhow::Result;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

const WIDTH: usize = 100;
const LIST_LIMIT: usize = 20;

pub fn run<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    input: &mut R,
    out: &mut W,
    reserve_percent: u8,
    today: NaiveDate,
) -> Result<()> {
    let account_id = match ledger.account_id() {
        Some(id) => id,
        None => {
            writeln!(out, "You have no accounts configured.")?;
            loop {
                let Some(name) = prompt(input, out, "Enter name for account: ")? else {
                    return Ok(());
                };
                match ledger.create_account(&name) {
                    Ok(account) => break account.id,
                    Err(e) if e.is_validation() => writeln!(out, "{}", e)?,
                    Err(e) => return Err(e.into()),
                }
            }
        }
    };

    let mut msg = String::new();
    loop {
        render(ledger, account_id, &msg, reserve_percent, today, out)?;
        let Some(option) = prompt(input, out, "> ")? else {
            break;
        };
        msg = match option.as_str() {
            "q" => break,
            "1" => entry(ledger, account_id, input, out, true, today)?,
            "2" => entry(ledger, account_id, input, out, false, today)?,
            "d" => delete_entry(ledger, input, out)?,
            "" => String::new(),
            other => format!("Unknown option '{}'", other),
        };
    }
    Ok(())
}

/// `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn entry<R: BufRead, W: Write>(
    ledger: &Ledger,
    account_id: i64,
    input: &mut R,
    out: &mut W,
    debit: bool,
    today: NaiveDate,
) -> Result<String> {
    let kind = if debit { "Debit" } else { "Deposit" };
    let Some(name) = prompt(input, out, &format!("{} Name > ", kind))? else {
        return Ok(String::new());
    };
    let Some(raw) = prompt(input, out, &format!("{} Amount > ", kind))? else {
        return Ok(String::new());
    };
    let amount = match parse_amount(&raw) {
        Ok(cents) => cents.abs(),
        Err(e) => return Ok(e.to_string()),
    };
    let new = NewTransaction {
        name,
        amount: if debit { -amount } else { amount },
        transaction_date: today,
        account_id,
    };
    match ledger.store().insert_transaction(&new) {
        Ok(t) => Ok(format!("{} recorded (id {})", kind, t.id)),
        Err(e) if e.is_validation() => Ok(e.to_string()),
        Err(e) => Err(e.into()),
    }
}

fn delete_entry<R: BufRead, W: Write>(ledger: &Ledger, input: &mut R, out: &mut W) -> Result<String> {
    let Some(raw) = prompt(input, out, "Entry ID > ")? else {
        return Ok(String::new());
    };
    let Ok(id) = raw.parse::<i64>() else {
        return Ok("Invalid Entry".to_string());
    };
    match ledger.store().delete_transaction(id) {
        Ok(()) => Ok("Transaction Deleted".to_string()),
        Err(e) if e.is_not_found() => Ok("Couldn't Delete Transaction".to_string()),
        Err(e) => Err(e.into()),
    }
}

fn render<W: Write>(
    ledger: &Ledger,
    account_id: i64,
    msg: &str,
    reserve_percent: u8,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let store = ledger.store();
    let account = store.get_account(account_id)?;
    writeln!(out)?;
    writeln!(out, "{}", header_row(&account.name, ledger, today))?;
    writeln!(out, "{}", msg)?;

    let total = available_balance(store, account_id)?;
    if reserve_percent > 0 {
        writeln!(
            out,
            "Available: {}  (spendable {} at {}% reserve)\n",
            format_currency(total),
            format_currency(spendable(total, reserve_percent)),
            reserve_percent
        )?;
    } else {
        writeln!(out, "Available: {}\n", format_currency(total))?;
    }

    for t in store.list_transactions(account_id)?.iter().take(LIST_LIMIT) {
        writeln!(out, "{}", transaction_line(t, WIDTH))?;
    }
    writeln!(out, "\n1) Debit  2) Deposit  d) Delete Entry    q) Quit")?;
    Ok(())
}

fn header_row(account_name: &str, ledger: &Ledger, today: NaiveDate) -> String {
    let title = format!("periodledger - {} [{}]", account_name, ledger.period());
    let date = today.format("%a  %d %b %Y").to_string();
    let space = WIDTH.saturating_sub(title.chars().count() + date.len()).max(1);
    format!("{}{}{}", title, " ".repeat(space), date)
}

/// `        12 | Mon 02 Jan |    -$5.00 | Coffee`, name cut to fit `width`.
pub fn transaction_line(t: &Transaction, width: usize) -> String {
    let date = t.transaction_date.format("%a %d %b").to_string();
    let amount = format_currency(t.amount);
    let name_width = width.saturating_sub(9 + 10 + 10 + date.len()).max(4);
    let name = if t.name.chars().count() > name_width {
        let cut: String = t.name.chars().take(name_width - 3).collect();
        format!("{}...", cut)
    } else {
        t.name.clone()
    };
    format!("{:>10} | {} | {:>10} | {}", t.id, date, amount, name)
}
