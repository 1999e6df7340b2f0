// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money::format_amount;
use crate::rollover::Ledger;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    // (id, date, account, name, amount), oldest first
    let period = ledger.period().to_string();
    let store = ledger.store();
    let mut rows = Vec::new();
    for account in store.list_accounts()? {
        for t in store.list_transactions(account.id)? {
            rows.push((
                t.id,
                t.transaction_date.to_string(),
                account.name.clone(),
                t.name,
                format_amount(t.amount),
            ));
        }
    }
    rows.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["period", "id", "date", "account", "name", "amount"])?;
            for (id, date, account, name, amount) in rows {
                wtr.write_record([period.clone(), id.to_string(), date, account, name, amount])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .into_iter()
                .map(|(id, date, account, name, amount)| {
                    json!({
                        "period": period, "id": id, "date": date, "account": account, "name": name, "amount": amount
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
