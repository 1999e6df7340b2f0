// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived balances. Nothing here is cached: every call re-reads the store.

use crate::db::Store;
use crate::error::{LedgerError, LedgerResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Surplus,
    Deficit,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Standing::Surplus => write!(f, "surplus"),
            Standing::Deficit => write!(f, "deficit"),
        }
    }
}

/// Sum of the account's transactions in cents; 0 when it has none.
pub fn available_balance(store: &Store, account_id: i64) -> LedgerResult<i64> {
    Ok(store.conn()?.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE account_id=?1",
        [account_id],
        |r| r.get(0),
    )?)
}

pub fn classify(balance: i64) -> Standing {
    if balance >= 0 {
        Standing::Surplus
    } else {
        Standing::Deficit
    }
}

pub fn validate_reserve(percent: u8) -> LedgerResult<u8> {
    if percent > 100 {
        return Err(LedgerError::Validation(format!(
            "Reserve percentage must be between 0 and 100, got {}",
            percent
        )));
    }
    Ok(percent)
}

/// Balance with `reserve_percent` held back, truncated toward zero.
///
/// A reserve of 0 spends the whole balance; a reserve of 90 leaves a tenth.
pub fn spendable(balance: i64, reserve_percent: u8) -> i64 {
    let keep = 100 - i128::from(reserve_percent.min(100));
    (i128::from(balance) * keep / 100) as i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub account_id: i64,
    pub total: i64,
    pub reserve_percent: u8,
    pub spendable: i64,
    pub standing: Standing,
    pub net_recurring: i64,
}

pub fn summarize(
    store: &Store,
    account_id: i64,
    reserve_percent: u8,
) -> LedgerResult<BalanceSummary> {
    let reserve_percent = validate_reserve(reserve_percent)?;
    let total = available_balance(store, account_id)?;
    Ok(BalanceSummary {
        account_id,
        total,
        reserve_percent,
        spendable: spendable(total, reserve_percent),
        standing: classify(total),
        net_recurring: store.sum_recurring(account_id)?,
    })
}
