// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod balance;
pub mod exporter;
pub mod menu;
pub mod periods;
pub mod recurrings;
pub mod transactions;

use crate::rollover::Ledger;
use crate::utils::parse_id;
use anyhow::Result;

/// `--account` when given (and known), otherwise the ledger's current account.
pub(crate) fn resolve_account(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<i64> {
    match sub.try_get_one::<String>("account").ok().flatten() {
        Some(raw) => {
            let id = parse_id(raw)?;
            ledger.store().get_account(id)?;
            Ok(id)
        }
        None => Ok(ledger.require_account()?),
    }
}
