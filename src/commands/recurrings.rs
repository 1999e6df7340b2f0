// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_account;
use crate::models::{NewRecurring, validate_day};
use crate::money::{format_amount, parse_amount};
use crate::recurring::{annotate, materialize};
use crate::rollover::Ledger;
use crate::utils::{date_or_today, json_flags, maybe_print_json, parse_id, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let account_id = resolve_account(ledger, sub)?;
            let r = ledger.store().insert_recurring(&NewRecurring {
                name: sub.get_one::<String>("name").unwrap().to_string(),
                amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
                occurrence_day: parse_day(sub.get_one::<String>("day").unwrap())?,
                account_id,
            })?;
            println!(
                "Added recurring '{}' {} on day {} (id {})",
                r.name,
                format_amount(r.amount),
                r.occurrence_day,
                r.id
            );
        }
        Some(("edit", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut r = ledger.store().get_recurring(id)?;
            if let Some(name) = sub.get_one::<String>("name") {
                r.name = name.to_string();
            }
            if let Some(amount) = sub.get_one::<String>("amount") {
                r.amount = parse_amount(amount)?;
            }
            if let Some(day) = sub.get_one::<String>("day") {
                r.occurrence_day = parse_day(day)?;
            }
            let r = ledger.store().update_recurring(&r)?;
            println!("Updated recurring {}", r.id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ledger.store().delete_recurring(id)?;
            println!("Removed recurring {}", id);
        }
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let data = query_rows(ledger, sub)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.to_string(),
                            r.day.to_string(),
                            r.amount.clone(),
                            r.name.clone(),
                            if r.accounted_for { "yes" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Day", "Amount", "Name", "Accounted for"], rows)
                );
            }
        }
        Some(("apply", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let t = materialize(ledger.store(), id, date_or_today(sub)?)?;
            println!(
                "Recorded '{}' {} on {} (id {})",
                t.name,
                format_amount(t.amount),
                t.transaction_date,
                t.id
            );
        }
        _ => {}
    }
    Ok(())
}

fn parse_day(raw: &str) -> Result<u8> {
    let day: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid day '{}'", raw.trim()))?;
    Ok(validate_day(day)?)
}

#[derive(Serialize)]
pub struct RecurringRow {
    pub id: i64,
    pub day: u8,
    pub name: String,
    pub amount: String,
    pub cents: i64,
    pub accounted_for: bool,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<RecurringRow>> {
    let account_id = resolve_account(ledger, sub)?;
    let store = ledger.store();
    let transactions = store.list_transactions(account_id)?;
    let rows = annotate(&transactions, store.list_recurrings(account_id)?)
        .into_iter()
        .map(|(r, accounted_for)| RecurringRow {
            id: r.id,
            day: r.occurrence_day,
            amount: format_amount(r.amount),
            cents: r.amount,
            name: r.name,
            accounted_for,
        })
        .collect();
    Ok(rows)
}
