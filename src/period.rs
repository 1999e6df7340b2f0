// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Accounting periods are calendar months named like `2024January`.

use crate::error::{LedgerError, LedgerResult};
use chrono::{Datelike, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_EXTENSION: &str = "db";

static PERIOD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})([A-Za-z]+)$").expect("period regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    /// Build from the year and English month name, e.g. `("2024", "December")`.
    pub fn from_parts(year: &str, month: &str) -> LedgerResult<Self> {
        let invalid = || LedgerError::InvalidPeriod(format!("{}{}", year.trim(), month.trim()));
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month = parse_month_name(month.trim()).ok_or_else(invalid)?;
        Ok(Period { year, month })
    }

    /// Parse an identifier such as `2024January`.
    pub fn parse(id: &str) -> LedgerResult<Self> {
        let caps = PERIOD_ID
            .captures(id.trim())
            .ok_or_else(|| LedgerError::InvalidPeriod(id.to_string()))?;
        Self::from_parts(&caps[1], &caps[2])
    }

    pub fn containing(date: NaiveDate) -> Self {
        let month = Month::try_from(date.month() as u8).unwrap_or(Month::January);
        Period {
            year: date.year(),
            month,
        }
    }

    /// The following calendar month; December wraps to January of the next year.
    pub fn next(&self) -> LedgerResult<Self> {
        let year = if self.month == Month::December {
            self.year
                .checked_add(1)
                .ok_or_else(|| LedgerError::InvalidPeriod(format!("{} has no next year", self)))?
        } else {
            self.year
        };
        Ok(Period {
            year,
            month: self.month.succ(),
        })
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self, STORE_EXTENSION)
    }

    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }

    fn key(&self) -> (i32, u32) {
        (self.year, self.month.number_from_month())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.month.name())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Only full English month names, any case.
fn parse_month_name(name: &str) -> Option<Month> {
    (1u8..=12)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|m| m.name().eq_ignore_ascii_case(name))
}

/// `("2024", "December")` -> `("2025", "January")`.
pub fn get_next_year_month(year: &str, month: &str) -> LedgerResult<(String, String)> {
    let next = Period::from_parts(year, month)?.next()?;
    Ok((next.year.to_string(), next.month.name().to_string()))
}

/// Every period that has a store file in `data_dir`, oldest first.
/// Files whose names are not period identifiers are ignored.
pub fn list_periods(data_dir: &Path) -> LedgerResult<Vec<Period>> {
    let mut periods = Vec::new();
    if !data_dir.exists() {
        return Ok(periods);
    }
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(STORE_EXTENSION) {
            continue;
        }
        if let Some(p) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| Period::parse(s).ok())
        {
            periods.push(p);
        }
    }
    periods.sort();
    Ok(periods)
}

/// The latest period on disk, if any.
pub fn current_period(data_dir: &Path) -> LedgerResult<Option<Period>> {
    Ok(list_periods(data_dir)?.pop())
}
