// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Recurring templates avoid 29-31 so every month has the day.
pub const MAX_OCCURRENCE_DAY: u8 = 28;

/// Trimmed name, or a validation error naming `what` when it is blank.
pub fn validate_name(name: &str, what: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(format!("{} name is required", what)));
    }
    Ok(trimmed.to_string())
}

pub fn validate_day(day: i64) -> LedgerResult<u8> {
    if (1..=MAX_OCCURRENCE_DAY as i64).contains(&day) {
        Ok(day as u8)
    } else {
        Err(LedgerError::Validation(format!(
            "Occurrence day must be between 1 and {}, got {}",
            MAX_OCCURRENCE_DAY, day
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// Sum of the account's transactions, in cents. Computed on read.
    pub total_available: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    pub amount: i64, // cents, negative = debit
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub account_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub name: String,
    pub amount: i64,
    pub transaction_date: NaiveDate,
    pub account_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    pub id: i64,
    pub name: String,
    pub amount: i64,
    pub occurrence_day: u8, // 1..=28
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecurring {
    pub name: String,
    pub amount: i64,
    pub occurrence_day: u8,
    pub account_id: i64,
}

impl From<&Recurring> for NewRecurring {
    fn from(r: &Recurring) -> Self {
        NewRecurring {
            name: r.name.clone(),
            amount: r.amount,
            occurrence_day: r.occurrence_day,
            account_id: r.account_id,
        }
    }
}
