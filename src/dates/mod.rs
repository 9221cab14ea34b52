//! Date parsing, normalization, and month arithmetic.
//!
//! Parsing is total: callers thread their "now" in as the fallback so the
//! engine never observes an unresolvable date and never reads a clock itself.

pub mod locale;

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("empty date string")]
    Empty,
    #[error("unrecognized date `{0}`")]
    Unrecognized(String),
    #[error("no such calendar date `{0}`")]
    OutOfRange(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayFirst,
    MonthFirst,
}

/// Parses a raw date string according to the locale's conventions.
///
/// Total: unrecoverable input falls back to `fallback` (the caller's "now")
/// and a warning names the offending input and locale.
pub fn parse_date(raw: &str, locale: &str, fallback: NaiveDate) -> NaiveDate {
    match try_parse_date(raw, locale) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(raw, locale, %err, "could not parse date, using current date instead");
            fallback
        }
    }
}

/// Fallible core of [`parse_date`], in priority order:
///
/// 1. `YYYY-MM-DD` is locale-independent and always wins.
/// 2. `.`-separated input is day-first (European convention).
/// 3. `/`-separated input is month-first only for `en-US` locales; locale
///    alone cannot disambiguate slashes, so everything else is day-first.
/// 4. A generic `-`-separated day-first form, e.g. `15-3-2024`.
pub fn try_parse_date(raw: &str, locale: &str) -> Result<NaiveDate, DateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateParseError::Empty);
    }
    if is_iso_shaped(raw) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| DateParseError::OutOfRange(raw.to_string()));
    }
    if raw.contains('.') {
        return assemble(raw, '.', FieldOrder::DayFirst);
    }
    if raw.contains('/') {
        let order = if locale.starts_with("en-US") {
            FieldOrder::MonthFirst
        } else {
            FieldOrder::DayFirst
        };
        return assemble(raw, '/', order);
    }
    if raw.contains('-') {
        return assemble(raw, '-', FieldOrder::DayFirst);
    }
    Err(DateParseError::Unrecognized(raw.to_string()))
}

/// Zero-padded `YYYY-MM-DD`; the inverse of the ISO branch of [`parse_date`].
pub fn format_iso(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Whole calendar months from `start` to `end`, negative when `end` precedes
/// `start`. Days within the month are ignored.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Shifts a date by whole months, clamping the day into shorter months.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn is_iso_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}

fn assemble(raw: &str, separator: char, order: FieldOrder) -> Result<NaiveDate, DateParseError> {
    let parts: Vec<&str> = raw.split(separator).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(DateParseError::Unrecognized(raw.to_string()));
    }
    let numbers: Vec<u32> = parts
        .iter()
        .map(|part| part.parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| DateParseError::Unrecognized(raw.to_string()))?;
    let (day, month) = match order {
        FieldOrder::DayFirst => (numbers[0], numbers[1]),
        FieldOrder::MonthFirst => (numbers[1], numbers[0]),
    };
    let year = numbers[2] as i32;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(DateParseError::OutOfRange(raw.to_string()));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(raw.to_string()))
}
