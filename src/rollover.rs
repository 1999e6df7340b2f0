// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The active ledger context and the month-end rollover.
//!
//! A [`Ledger`] owns the one open store for its data directory. Rolling over
//! reads the current account and its recurring templates, closes the current
//! period, and seeds the next period's store in a single SQLite transaction:
//! the account (same id and name), a copy of every template, and a
//! "Starting Balance" transaction equal to the carried balance. A next-period
//! file that does not exist yet is seeded under a temp name and linked into
//! place, so it never appears half written. If seeding fails nothing is
//! committed and the previous period becomes active again.

use crate::db::{self, Store};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, NewRecurring, NewTransaction, Recurring};
use crate::period::{Period, current_period};
use chrono::NaiveDate;
use rusqlite::TransactionBehavior;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const STARTING_BALANCE: &str = "Starting Balance";

pub struct Ledger {
    data_dir: PathBuf,
    period: Period,
    store: Store,
    account_id: Option<i64>,
}

impl Ledger {
    /// Open the latest period found in `data_dir`, or start the period
    /// containing `today` when the directory holds none.
    pub fn open(data_dir: impl Into<PathBuf>, today: NaiveDate) -> LedgerResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        let period = current_period(&data_dir)?.unwrap_or_else(|| Period::containing(today));
        Self::open_period(data_dir, period)
    }

    pub fn open_period(data_dir: impl Into<PathBuf>, period: Period) -> LedgerResult<Self> {
        let data_dir = data_dir.into();
        let store = Store::open(period.store_path(&data_dir))?;
        let account_id = store.default_account()?.map(|a| a.id);
        info!(period = %period, ?account_id, "ledger opened");
        Ok(Ledger {
            data_dir,
            period,
            store,
            account_id,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn account_id(&self) -> Option<i64> {
        self.account_id
    }

    pub fn require_account(&self) -> LedgerResult<i64> {
        self.account_id.ok_or_else(|| {
            LedgerError::Validation("No account configured; add one first".to_string())
        })
    }

    /// Create an account; the first one created becomes the current account.
    pub fn create_account(&mut self, name: &str) -> LedgerResult<Account> {
        let account = self.store.insert_account(name)?;
        if self.account_id.is_none() {
            self.account_id = Some(account.id);
        }
        Ok(account)
    }

    pub fn select_account(&mut self, id: i64) -> LedgerResult<Account> {
        let account = self.store.get_account(id)?;
        self.account_id = Some(account.id);
        Ok(account)
    }

    /// Move the current account into the next period. Returns the new period.
    pub fn rollover(&mut self, as_of: NaiveDate) -> LedgerResult<Period> {
        let account_id = self.require_account()?;
        let snapshot = Snapshot::capture(&self.store, account_id)?;
        let next = self.period.next()?;
        let source_path = self.period.store_path(&self.data_dir);
        let target_path = next.store_path(&self.data_dir);
        info!(
            from = %self.period,
            to = %next,
            account_id,
            carried = snapshot.account.total_available,
            recurrings = snapshot.recurrings.len(),
            "rollover started"
        );

        if let Err(err) = self.store.close() {
            self.store = Store::open(&source_path)?;
            return Err(LedgerError::Rollover(format!(
                "closing {}: {}",
                self.period, err
            )));
        }

        let seeded = if target_path.exists() {
            open_seeded(&target_path, &snapshot, as_of)
        } else {
            publish_seeded(&self.data_dir, &target_path, &snapshot, as_of)
        };
        match seeded {
            Ok(store) => {
                self.store = store;
                self.period = next;
                info!(period = %next, "rollover finished");
                Ok(next)
            }
            Err(err) => {
                warn!(error = %err, target = %target_path.display(), "rollover failed");
                self.store = Store::open(&source_path)?;
                Err(match err {
                    LedgerError::Rollover(_) => err,
                    other => LedgerError::Rollover(format!("seeding {}: {}", next, other)),
                })
            }
        }
    }
}

/// What a rollover carries out of the closing period.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub account: Account,
    pub recurrings: Vec<Recurring>,
}

impl Snapshot {
    pub fn capture(store: &Store, account_id: i64) -> LedgerResult<Self> {
        let account = store.get_account(account_id).map_err(|e| {
            LedgerError::Rollover(format!("reading account {}: {}", account_id, e))
        })?;
        let recurrings = store.list_recurrings(account_id).map_err(|e| {
            LedgerError::Rollover(format!("reading recurrings for {}: {}", account_id, e))
        })?;
        Ok(Snapshot {
            account,
            recurrings,
        })
    }
}

/// Seed a target file that is already on disk. The write lock taken by
/// [`seed`] serializes racing rollovers; the loser sees the winner's account.
fn open_seeded(path: &Path, snapshot: &Snapshot, as_of: NaiveDate) -> LedgerResult<Store> {
    let mut store = Store::open(path)?;
    if let Err(err) = seed(&mut store, snapshot, as_of) {
        store.close()?;
        return Err(err);
    }
    Ok(store)
}

/// Seed a private temp file next to `target`, then hard-link it into place.
///
/// The link fails if `target` appeared in the meantime, so `target` only ever
/// exists fully seeded and is never removed here. The temp file is deleted
/// when `staged` drops, on every path.
fn publish_seeded(
    data_dir: &Path,
    target: &Path,
    snapshot: &Snapshot,
    as_of: NaiveDate,
) -> LedgerResult<Store> {
    let prefix = format!(".{}.", target.file_name().and_then(|n| n.to_str()).unwrap_or("period"));
    let staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(data_dir)?
        .into_temp_path();

    let mut store = open_seeded(&staged, snapshot, as_of)?;
    store.close()?;

    match fs::hard_link(&staged, target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(LedgerError::Rollover(format!(
                "{} was created by another rollover",
                target.display()
            )));
        }
        Err(err) => return Err(err.into()),
    }
    staged.close()?;
    Store::open(target)
}

/// Write the snapshot into an empty period store. All or nothing.
pub fn seed(target: &mut Store, snapshot: &Snapshot, as_of: NaiveDate) -> LedgerResult<()> {
    let conn = target.conn_mut()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if db::accounts::count(&tx)? > 0 {
        return Err(LedgerError::Rollover(
            "the next period already has accounts".to_string(),
        ));
    }

    let account = &snapshot.account;
    db::accounts::insert(&tx, Some(account.id), &account.name)?;
    for r in &snapshot.recurrings {
        db::recurrings::insert(
            &tx,
            &NewRecurring {
                account_id: account.id,
                ..NewRecurring::from(r)
            },
        )?;
    }
    db::transactions::insert(
        &tx,
        &NewTransaction {
            name: STARTING_BALANCE.to_string(),
            amount: account.total_available,
            transaction_date: as_of,
            account_id: account.id,
        },
    )?;

    tx.commit()?;
    Ok(())
}
