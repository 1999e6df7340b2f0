// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::TransactionRow;
use crate::money::format_amount;
use crate::rollover::Ledger;
use crate::utils::{json_flags, maybe_print_json, parse_id, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let account = ledger.create_account(name)?;
            println!("Added account '{}' (id {})", account.name, account.id);
        }
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let accounts = ledger.store().list_accounts()?;
            if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
                let current = ledger.account_id();
                let data = accounts
                    .into_iter()
                    .map(|a| {
                        let marker = if Some(a.id) == current { "*" } else { "" };
                        vec![
                            marker.to_string(),
                            a.id.to_string(),
                            a.name,
                            format_amount(a.total_available),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["", "ID", "Name", "Available"], data)
                );
            }
        }
        Some(("use", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let account = ledger.select_account(id)?;
            println!(
                "Account '{}' (id {}): {} available",
                account.name,
                account.id,
                format_amount(account.total_available)
            );
            let rows: Vec<Vec<String>> = ledger
                .store()
                .list_transactions(account.id)?
                .iter()
                .map(TransactionRow::from)
                .map(|r| vec![r.id.to_string(), r.date, r.amount, r.name])
                .collect();
            println!("{}", pretty_table(&["ID", "Date", "Amount", "Name"], rows));
        }
        _ => {}
    }
    Ok(())
}
