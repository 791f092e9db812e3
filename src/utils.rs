// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use crate::models::Transaction;

/// Formats tried after the two literal forms, in order.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

/// Parses a calendar day as written by a user or a bank export.
///
/// `YYYY-MM-DD` and `M/D/YYYY` are the canonical forms. Anything else goes
/// through a lenient fallback: a handful of spelled-out layouts plus full
/// timestamps (RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM:SS`), which are reduced
/// to the local calendar day they fall on.
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if has_four_digit_year(s, '-', 0) {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(d);
        }
    }
    if has_four_digit_year(s, '/', 2) {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
            return Some(d);
        }
    }
    fallback_date(s)
}

// chrono's %Y takes a year of any width, so "3/7/25" would otherwise land in year 25.
fn has_four_digit_year(s: &str, sep: char, year_field: usize) -> bool {
    s.split(sep)
        .nth(year_field)
        .is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
}

fn fallback_date(s: &str) -> Option<NaiveDate> {
    if let Some(d) = FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_local_date(s).with_context(|| format!("Invalid date '{}'", s))
}

/// Lenient numeric coercion used at ingestion: numeric text parses, anything else is 0.
pub fn coerce_amount(s: &str) -> f64 {
    let t = s.trim();
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => leading_number(t).unwrap_or(0.0),
    }
}

// "12.50 USD" -> 12.5, mirroring how spreadsheets export amounts with a trailing unit.
fn leading_number(s: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .take_while(|&(i, c)| match c {
            '0'..='9' => true,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            '-' | '+' => i == 0,
            _ => false,
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn fmt_money(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// `count` new ids of the form `<unix-millis>-<n>`, distinct from each other
/// and from every id already in `ledger`.
pub fn fresh_transaction_ids(ledger: &[Transaction], count: usize) -> Vec<String> {
    ids_at(chrono::Utc::now().timestamp_millis(), ledger, count)
}

fn ids_at(millis: i64, ledger: &[Transaction], count: usize) -> Vec<String> {
    // seq only moves forward, so ids within one batch never repeat
    let mut seq = ledger.len();
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let id = format!("{}-{}", millis, seq);
        seq += 1;
        if !ledger.iter().any(|t| t.id == id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_and_us_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_local_date("2025-03-07"), Some(d));
        assert_eq!(parse_local_date("3/7/2025"), Some(d));
        assert_eq!(parse_local_date("03/07/2025"), Some(d));
    }

    #[test]
    fn fallback_handles_spelled_out_and_timestamps() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_local_date("March 7, 2025"), Some(d));
        assert_eq!(parse_local_date("2025/03/07"), Some(d));
        assert_eq!(parse_local_date("2025-03-07T10:15:00"), Some(d));
        assert_eq!(parse_local_date("not a date"), None);
        assert_eq!(parse_local_date("2025-02-30"), None);
    }

    #[test]
    fn two_digit_years_are_not_read_as_literal_years() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_local_date("3/7/25"), Some(d));
        assert_eq!(parse_local_date("03/07/25"), Some(d));
        assert_eq!(parse_local_date("25-03-07"), None);
        assert_eq!(parse_local_date("12/31/99"), NaiveDate::from_ymd_opt(1999, 12, 31));
    }

    #[test]
    fn coerce_amount_is_lenient() {
        assert_eq!(coerce_amount(" 4.5 "), 4.5);
        assert_eq!(coerce_amount("-12"), -12.0);
        assert_eq!(coerce_amount("12.50 USD"), 12.5);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
    }

    #[test]
    fn leading_number_stops_at_second_dot() {
        assert_eq!(coerce_amount("1.2.3"), 1.2);
        assert_eq!(coerce_amount("-4.5.6 USD"), -4.5);
        assert_eq!(coerce_amount("."), 0.0);
    }

    fn txn(id: &str) -> Transaction {
        Transaction {
            id: id.into(),
            date: "2025-01-01".into(),
            description: "x".into(),
            amount: 0.0,
            category: None,
        }
    }

    #[test]
    fn batch_ids_skip_taken_ids_without_repeating() {
        // ledger of 2 starts at seq 2, which is taken along with 3
        let ledger = vec![txn("1000-2"), txn("1000-3")];
        assert_eq!(ids_at(1000, &ledger, 3), vec!["1000-4", "1000-5", "1000-6"]);

        let ledger = vec![txn("a"), txn("1000-2")];
        assert_eq!(ids_at(1000, &ledger, 2), vec!["1000-3", "1000-4"]);
        assert!(ids_at(1000, &[], 0).is_empty());
    }
}
