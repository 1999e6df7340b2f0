// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Integer-cent amounts.
//!
//! Every amount in the ledger is an `i64` count of cents. Text only turns into
//! a decimal at the display edge, through `rust_decimal`, so a value read back
//! from a store always prints exactly as it was entered.

use crate::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;

/// Parse user input such as `"12.50"`, `"$ 3.00"`, `"-40"` or `"1200"` into cents.
///
/// With a decimal point the two digits after it are the cents. Without one the
/// value is whole units.
pub fn parse_amount(text: &str) -> LedgerResult<i64> {
    let invalid = || LedgerError::InvalidAmount(text.trim().to_string());

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let s = compact.strip_prefix('$').unwrap_or(&compact);
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);

    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (s, None),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) {
        return Err(invalid());
    }

    let units: i64 = if whole.is_empty() {
        if frac.is_none() {
            return Err(invalid());
        }
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let cents: i64 = match frac {
        Some(f) if f.len() == 2 && all_digits(f) => f.parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
        None => 0,
    };

    let total = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(invalid)?;
    Ok(if negative { -total } else { total })
}

pub fn to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// `1250` -> `"12.50"`, `-500` -> `"-5.00"`.
pub fn format_amount(cents: i64) -> String {
    format!("{:.2}", to_decimal(cents))
}

/// Like [`format_amount`] with a leading `$`, sign first: `-500` -> `"-$5.00"`.
pub fn format_currency(cents: i64) -> String {
    let d = to_decimal(cents);
    if d.is_sign_negative() && !d.is_zero() {
        format!("-${:.2}", d.abs())
    } else {
        format!("${:.2}", d)
    }
}
