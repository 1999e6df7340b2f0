// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One SQLite file per accounting period.
//!
//! Each entity has its own module of SQL functions over `&Connection`, so the
//! rollover can run them inside a single SQLite transaction. [`Store`] wraps
//! those functions for everyday use against the active period.

pub mod accounts;
pub mod recurrings;
pub mod transactions;

use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Table-level facts the generic repository functions need.
pub trait Record {
    const TABLE: &'static str;
    const ENTITY: &'static str;
}

pub struct Store {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open the period file at `path`, creating the schema when it is new.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "creating period store");
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        debug!(path = %path.display(), "opened period store");
        Ok(Store {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store {
            conn: Some(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. Calling it again is a no-op.
    pub fn close(&mut self) -> LedgerResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| err)?;
            debug!(path = ?self.path, "closed period store");
        }
        Ok(())
    }

    pub fn conn(&self) -> LedgerResult<&Connection> {
        self.conn.as_ref().ok_or(LedgerError::StoreClosed)
    }

    pub(crate) fn conn_mut(&mut self) -> LedgerResult<&mut Connection> {
        self.conn.as_mut().ok_or(LedgerError::StoreClosed)
    }
}

fn init_schema(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        transaction_date TEXT NOT NULL,
        amount INTEGER NOT NULL, -- cents
        name TEXT NOT NULL,
        account_id INTEGER NOT NULL,
        category_id INTEGER, -- reserved
        timestamp_added INTEGER NOT NULL, -- unix millis
        FOREIGN KEY(account_id) REFERENCES accounts(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_account
        ON transactions(account_id, transaction_date);

    CREATE TABLE IF NOT EXISTS recurrings(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        category_id INTEGER, -- reserved
        name TEXT NOT NULL,
        occurrence_day INTEGER NOT NULL CHECK(occurrence_day BETWEEN 1 AND 28),
        amount INTEGER NOT NULL, -- cents
        timestamp_added INTEGER NOT NULL,
        FOREIGN KEY(account_id) REFERENCES accounts(id)
    );
    "#,
    )?;
    Ok(())
}

pub(crate) fn delete_record<R: Record>(conn: &Connection, id: i64) -> LedgerResult<()> {
    let sql = format!("DELETE FROM {} WHERE id=?1", R::TABLE);
    let removed = conn.execute(&sql, params![id])?;
    if removed == 0 {
        return Err(LedgerError::not_found(R::ENTITY, id));
    }
    Ok(())
}

pub(crate) fn ensure_exists<R: Record>(conn: &Connection, id: i64) -> LedgerResult<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id=?1)", R::TABLE);
    let found: bool = conn.query_row(&sql, params![id], |r| r.get(0))?;
    if found {
        Ok(())
    } else {
        Err(LedgerError::not_found(R::ENTITY, id))
    }
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn millis_to_utc(col: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(rusqlite::Error::IntegralValueOutOfRange(col, ms))
}
