// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::resolve_account;
use crate::balance::{BalanceSummary, summarize};
use crate::money::format_currency;
use crate::rollover::Ledger;
use crate::utils::{json_flags, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches, reserve_percent: u8) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let summary = query(ledger, sub, reserve_percent)?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = vec![
            vec!["Period".into(), ledger.period().to_string()],
            vec!["Available".into(), format_currency(summary.total)],
            vec![
                format!("Spendable ({}% reserve)", summary.reserve_percent),
                format_currency(summary.spendable),
            ],
            vec!["Standing".into(), summary.standing.to_string()],
            vec!["Net recurring".into(), format_currency(summary.net_recurring)],
        ];
        println!("{}", pretty_table(&["", ""], rows));
    }
    Ok(())
}

pub fn query(ledger: &Ledger, sub: &clap::ArgMatches, reserve_percent: u8) -> Result<BalanceSummary> {
    let account_id = resolve_account(ledger, sub)?;
    Ok(summarize(ledger.store(), account_id, reserve_percent)?)
}
