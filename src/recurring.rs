// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turning recurring templates into real transactions.

use crate::db::Store;
use crate::error::LedgerResult;
use crate::models::{NewTransaction, Recurring, Transaction};
use chrono::NaiveDate;
use tracing::info;

pub use crate::models::validate_day;

/// Record the template `recurring_id` as a transaction dated `as_of`.
///
/// The template is left in place, so applying it twice records it twice.
pub fn materialize(store: &Store, recurring_id: i64, as_of: NaiveDate) -> LedgerResult<Transaction> {
    let template = store.get_recurring(recurring_id)?;
    let created = store.insert_transaction(&NewTransaction {
        name: template.name.clone(),
        amount: template.amount,
        transaction_date: as_of,
        account_id: template.account_id,
    })?;
    info!(
        recurring_id,
        transaction_id = created.id,
        name = %template.name,
        "materialized recurring"
    );
    Ok(created)
}

/// Whether some transaction already carries the template's name (case and
/// surrounding whitespace ignored).
pub fn accounted_for(transactions: &[Transaction], recurring_name: &str) -> bool {
    let wanted = recurring_name.trim().to_lowercase();
    transactions
        .iter()
        .any(|t| t.name.trim().to_lowercase() == wanted)
}

pub fn annotate(transactions: &[Transaction], recurrings: Vec<Recurring>) -> Vec<(Recurring, bool)> {
    recurrings
        .into_iter()
        .map(|r| {
            let seen = accounted_for(transactions, &r.name);
            (r, seen)
        })
        .collect()
}
