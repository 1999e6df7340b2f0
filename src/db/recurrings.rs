// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Record, Store, delete_record, ensure_exists, millis_to_utc, now_millis};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, NewRecurring, Recurring, validate_day, validate_name};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

impl Record for Recurring {
    const TABLE: &'static str = "recurrings";
    const ENTITY: &'static str = "Recurring";
}

const SELECT_RECURRING: &str =
    "SELECT id, name, amount, occurrence_day, account_id, timestamp_added FROM recurrings";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Recurring> {
    Ok(Recurring {
        id: r.get(0)?,
        name: r.get(1)?,
        amount: r.get(2)?,
        occurrence_day: r.get(3)?,
        account_id: r.get(4)?,
        created_at: millis_to_utc(5, r.get(5)?)?,
    })
}

pub fn insert(conn: &Connection, new: &NewRecurring) -> LedgerResult<Recurring> {
    let name = validate_name(&new.name, "Recurring")?;
    let day = validate_day(new.occurrence_day.into())?;
    ensure_exists::<Account>(conn, new.account_id)?;
    conn.execute(
        "INSERT INTO recurrings(account_id, name, amount, occurrence_day, timestamp_added)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.account_id, name, new.amount, day, now_millis()],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, account_id = new.account_id, day, "inserted recurring");
    get(conn, id)
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Recurring> {
    let sql = format!("{} WHERE id=?1", SELECT_RECURRING);
    conn.query_row(&sql, params![id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Recurring::ENTITY, id))
}

pub fn list(conn: &Connection, account_id: i64) -> LedgerResult<Vec<Recurring>> {
    let sql = format!(
        "{} WHERE account_id=?1 ORDER BY occurrence_day ASC, timestamp_added DESC, id DESC",
        SELECT_RECURRING
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![account_id], from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn sum(conn: &Connection, account_id: i64) -> LedgerResult<i64> {
    Ok(conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM recurrings WHERE account_id=?1",
        params![account_id],
        |r| r.get(0),
    )?)
}

impl Store {
    pub fn insert_recurring(&self, new: &NewRecurring) -> LedgerResult<Recurring> {
        insert(self.conn()?, new)
    }

    pub fn get_recurring(&self, id: i64) -> LedgerResult<Recurring> {
        get(self.conn()?, id)
    }

    pub fn update_recurring(&self, r: &Recurring) -> LedgerResult<Recurring> {
        let name = validate_name(&r.name, "Recurring")?;
        let day = validate_day(r.occurrence_day.into())?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE recurrings SET name=?1, amount=?2, occurrence_day=?3 WHERE id=?4",
            params![name, r.amount, day, r.id],
        )?;
        if changed == 0 {
            return Err(LedgerError::not_found(Recurring::ENTITY, r.id));
        }
        get(conn, r.id)
    }

    pub fn delete_recurring(&self, id: i64) -> LedgerResult<()> {
        delete_record::<Recurring>(self.conn()?, id)
    }

    pub fn list_recurrings(&self, account_id: i64) -> LedgerResult<Vec<Recurring>> {
        list(self.conn()?, account_id)
    }

    /// Net of all recurring amounts for the account, 0 when there are none.
    pub fn sum_recurring(&self, account_id: i64) -> LedgerResult<i64> {
        sum(self.conn()?, account_id)
    }
}
