// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::available_balance;
use crate::money::format_currency;
use crate::period::list_periods;
use crate::rollover::Ledger;
use crate::utils::{date_or_today, parse_id, pretty_table};
use anyhow::{Context, Result};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            println!(
                "Active period {} ({})",
                ledger.period(),
                ledger.period().store_path(ledger.data_dir()).display()
            );
            println!("Next period {}", ledger.period().next()?);
        }
        Some(("list", _)) => {
            let active = ledger.period();
            let rows = list_periods(ledger.data_dir())?
                .into_iter()
                .map(|p| {
                    let marker = if p == active { "*" } else { "" };
                    vec![marker.to_string(), p.to_string(), p.file_name()]
                })
                .collect();
            println!("{}", pretty_table(&["", "Period", "File"], rows));
        }
        Some(("next", sub)) => {
            if let Some(raw) = sub.get_one::<String>("account") {
                ledger.select_account(parse_id(raw)?)?;
            }
            let as_of = date_or_today(sub)?;
            let from = ledger.period();
            let to = ledger
                .rollover(as_of)
                .with_context(|| format!("Rolling over {}", from))?;
            let account_id = ledger.require_account()?;
            let balance = available_balance(ledger.store(), account_id)?;
            println!(
                "Rolled over {} -> {}; starting balance {}",
                from,
                to,
                format_currency(balance)
            );
        }
        _ => {}
    }
    Ok(())
}
