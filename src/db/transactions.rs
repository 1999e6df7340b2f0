// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Record, Store, delete_record, ensure_exists, millis_to_utc, now_millis};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, NewTransaction, Transaction, validate_name};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

impl Record for Transaction {
    const TABLE: &'static str = "transactions";
    const ENTITY: &'static str = "Transaction";
}

const SELECT_TRANSACTION: &str =
    "SELECT id, name, amount, transaction_date, timestamp_added, account_id FROM transactions";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        name: r.get(1)?,
        amount: r.get(2)?,
        transaction_date: r.get(3)?,
        created_at: millis_to_utc(4, r.get(4)?)?,
        account_id: r.get(5)?,
    })
}

pub fn insert(conn: &Connection, new: &NewTransaction) -> LedgerResult<Transaction> {
    let name = validate_name(&new.name, "Transaction")?;
    ensure_exists::<Account>(conn, new.account_id)?;
    conn.execute(
        "INSERT INTO transactions(account_id, name, amount, transaction_date, timestamp_added)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.account_id,
            name,
            new.amount,
            new.transaction_date,
            now_millis()
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, account_id = new.account_id, amount = new.amount, "inserted transaction");
    get(conn, id)
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Transaction> {
    let sql = format!("{} WHERE id=?1", SELECT_TRANSACTION);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Transaction::ENTITY, id))
}

/// Most recent first; same-day entries show the last added first.
pub fn list(conn: &Connection, account_id: i64) -> LedgerResult<Vec<Transaction>> {
    let sql = format!(
        "{} WHERE account_id=?1 ORDER BY transaction_date DESC, timestamp_added DESC, id DESC",
        SELECT_TRANSACTION
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![account_id], from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

impl Store {
    pub fn insert_transaction(&self, new: &NewTransaction) -> LedgerResult<Transaction> {
        insert(self.conn()?, new)
    }

    pub fn get_transaction(&self, id: i64) -> LedgerResult<Transaction> {
        get(self.conn()?, id)
    }

    /// Rewrites name and amount. Date, account and insertion time stay as recorded.
    pub fn update_transaction(&self, t: &Transaction) -> LedgerResult<Transaction> {
        let name = validate_name(&t.name, "Transaction")?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE transactions SET name=?1, amount=?2 WHERE id=?3",
            params![name, t.amount, t.id],
        )?;
        if changed == 0 {
            return Err(LedgerError::not_found(Transaction::ENTITY, t.id));
        }
        get(conn, t.id)
    }

    pub fn delete_transaction(&self, id: i64) -> LedgerResult<()> {
        delete_record::<Transaction>(self.conn()?, id)
    }

    pub fn list_transactions(&self, account_id: i64) -> LedgerResult<Vec<Transaction>> {
        list(self.conn()?, account_id)
    }
}
