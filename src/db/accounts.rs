// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Record, Store};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, validate_name};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

impl Record for Account {
    const TABLE: &'static str = "accounts";
    const ENTITY: &'static str = "Account";
}

const SELECT_ACCOUNT: &str = "SELECT a.id, a.name, COALESCE(SUM(t.amount), 0)
     FROM accounts a
     LEFT JOIN transactions t ON t.account_id = a.id";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        total_available: r.get(2)?,
    })
}

/// Insert an account. `id` is given when a rollover carries an account forward.
pub fn insert(conn: &Connection, id: Option<i64>, name: &str) -> LedgerResult<Account> {
    let name = validate_name(name, "Account")?;
    conn.execute(
        "INSERT INTO accounts(id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, name = %name, "created account");
    get(conn, id)
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Account> {
    let sql = format!("{} WHERE a.id=?1 GROUP BY a.id, a.name", SELECT_ACCOUNT);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Account::ENTITY, id))
}

pub fn list(conn: &Connection) -> LedgerResult<Vec<Account>> {
    let sql = format!("{} GROUP BY a.id, a.name ORDER BY a.name, a.id", SELECT_ACCOUNT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> LedgerResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?)
}

impl Store {
    pub fn has_any_account(&self) -> LedgerResult<bool> {
        Ok(count(self.conn()?)? > 0)
    }

    pub fn insert_account(&self, name: &str) -> LedgerResult<Account> {
        insert(self.conn()?, None, name)
    }

    pub fn get_account(&self, id: i64) -> LedgerResult<Account> {
        get(self.conn()?, id)
    }

    pub fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        list(self.conn()?)
    }

    /// The account a front end starts on: the first one created.
    pub fn default_account(&self) -> LedgerResult<Option<Account>> {
        let id: Option<i64> = self
            .conn()?
            .query_row("SELECT MIN(id) FROM accounts", [], |r| r.get(0))?;
        id.map(|id| self.get_account(id)).transpose()
    }
}
