// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use periodledger::LedgerError;
use periodledger::money::{format_amount, format_currency, parse_amount};

#[test]
fn parses_cents_and_whole_units() {
    assert_eq!(parse_amount("12.50").unwrap(), 1250);
    assert_eq!(parse_amount("12").unwrap(), 1200);
    assert_eq!(parse_amount("1200").unwrap(), 120000);
    assert_eq!(parse_amount("$ 3.00").unwrap(), 300);
    assert_eq!(parse_amount("  0.07 ").unwrap(), 7);
    assert_eq!(parse_amount(".50").unwrap(), 50);
    assert_eq!(parse_amount("1 200.00").unwrap(), 120000);
}

#[test]
fn parses_negative_amounts_with_symbol_on_either_side() {
    assert_eq!(parse_amount("-5.00").unwrap(), -500);
    assert_eq!(parse_amount("-$5.00").unwrap(), -500);
    assert_eq!(parse_amount("$-5.00").unwrap(), -500);
    assert_eq!(parse_amount("- 40").unwrap(), -4000);
}

#[test]
fn rejects_non_numeric_input() {
    for bad in ["", "   ", "$", "-", "abc", "12a", "1.2.3", "12.5", "1.234", "1,200", "+5"] {
        let err = parse_amount(bad).unwrap_err();
        assert!(
            matches!(err, LedgerError::InvalidAmount(_)),
            "expected InvalidAmount for {:?}, got {:?}",
            bad,
            err
        );
        assert!(err.is_validation());
    }
}

#[test]
fn rejects_overflowing_amounts() {
    assert!(parse_amount("92233720368547758.08").is_err());
    assert!(parse_amount("999999999999999999999").is_err());
}

#[test]
fn formats_two_fraction_digits() {
    assert_eq!(format_amount(1250), "12.50");
    assert_eq!(format_amount(-500), "-5.00");
    assert_eq!(format_amount(0), "0.00");
    assert_eq!(format_amount(5), "0.05");
    assert_eq!(format_amount(-5), "-0.05");
    assert_eq!(format_amount(123456789), "1234567.89");
}

#[test]
fn formats_currency_sign_before_symbol() {
    assert_eq!(format_currency(1250), "$12.50");
    assert_eq!(format_currency(-500), "-$5.00");
    assert_eq!(format_currency(0), "$0.00");
}

#[test]
fn format_then_parse_is_stable() {
    for s in ["0.01", "0.10", "12.50", "-12.50", "$ 3.00", "1000000.99", "0.29", "19.99"] {
        let cents = parse_amount(s).unwrap();
        assert_eq!(parse_amount(&format_amount(cents)).unwrap(), cents, "{}", s);
        assert_eq!(parse_amount(&format_currency(cents)).unwrap(), cents, "{}", s);
    }
}
