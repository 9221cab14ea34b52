//! Maps raw spreadsheet rows into normalized [`Subscription`] records.
//!
//! The row source itself (HTTP proxy, auth) lives outside this crate; what
//! arrives here is the proxy's payload shape: a header row plus data rows of
//! strings. Rows that fail validation are dropped with a warning naming the
//! row index and never reach the engine.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::warn;

use crate::dates::{parse_date, try_parse_date};
use crate::domain::{Frequency, Subscription};
use crate::errors::SubcalError;

/// Raw tabular payload as returned by the spreadsheet proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetTable {
    pub values: Vec<Vec<String>>,
}

/// Reads a proxy payload from disk.
pub fn load_table(path: &Path) -> Result<SheetTable, SubcalError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Convenience wrapper: load a payload file and normalize its rows.
pub fn load_subscriptions(
    path: &Path,
    locale: &str,
    now: NaiveDate,
) -> Result<Vec<Subscription>, SubcalError> {
    let table = load_table(path)?;
    parse_rows(&table, locale, now)
}

struct Columns {
    name: usize,
    amount: usize,
    currency: usize,
    frequency: usize,
    day_of_month: usize,
    color: usize,
    logo: usize,
    start_date: usize,
    end_date: Option<usize>,
}

fn map_columns(header: &[String]) -> Result<Columns, SubcalError> {
    let normalized: Vec<String> = header
        .iter()
        .map(|cell| cell.to_lowercase().replace(' ', ""))
        .collect();
    let find = |key: &'static str| -> Result<usize, SubcalError> {
        normalized
            .iter()
            .position(|cell| cell == key)
            .ok_or(SubcalError::MissingColumn(key))
    };
    Ok(Columns {
        name: find("name")?,
        amount: find("amount")?,
        currency: find("currency")?,
        frequency: find("frequency")?,
        day_of_month: find("dayofmonth")?,
        color: find("color")?,
        logo: find("logo")?,
        start_date: find("startdate")?,
        end_date: normalized.iter().position(|cell| cell == "enddate"),
    })
}

enum RowIssue {
    Missing(&'static str),
    NotANumber(&'static str),
    DayOutOfRange(u32),
    NonPositiveAmount(f64),
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssue::Missing(field) => write!(f, "missing `{field}`"),
            RowIssue::NotANumber(field) => write!(f, "`{field}` is not a number"),
            RowIssue::DayOutOfRange(day) => write!(f, "day of month {day} outside 1-31"),
            RowIssue::NonPositiveAmount(amount) => write!(f, "amount {amount} is not positive"),
        }
    }
}

/// Normalizes data rows into subscriptions, assigning ids from the 1-based
/// row position. `now` is the deterministic fallback for unparseable start
/// dates (spec'd parser behavior) and is threaded in by the caller.
pub fn parse_rows(
    table: &SheetTable,
    locale: &str,
    now: NaiveDate,
) -> Result<Vec<Subscription>, SubcalError> {
    let Some((header, rows)) = table.values.split_first() else {
        return Err(SubcalError::EmptySheet);
    };
    if rows.is_empty() {
        return Err(SubcalError::EmptySheet);
    }
    let columns = map_columns(header)?;

    let mut subscriptions = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let id = index as u32 + 1;
        match parse_row(row, &columns, id, locale, now) {
            Ok(subscription) => subscriptions.push(subscription),
            Err(issue) => warn!(row = id, %issue, "row has invalid data, skipping"),
        }
    }
    if subscriptions.is_empty() {
        return Err(SubcalError::NoSubscriptions);
    }
    Ok(subscriptions)
}

fn parse_row(
    row: &[String],
    columns: &Columns,
    id: u32,
    locale: &str,
    now: NaiveDate,
) -> Result<Subscription, RowIssue> {
    let field = |index: usize, name: &'static str| -> Result<&str, RowIssue> {
        row.get(index)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .ok_or(RowIssue::Missing(name))
    };

    let name = field(columns.name, "name")?;
    let amount: f64 = field(columns.amount, "amount")?
        .parse()
        .map_err(|_| RowIssue::NotANumber("amount"))?;
    if amount <= 0.0 {
        return Err(RowIssue::NonPositiveAmount(amount));
    }
    let currency = field(columns.currency, "currency")?;
    let frequency = Frequency::normalize(field(columns.frequency, "frequency")?);
    let day_of_month: u32 = field(columns.day_of_month, "day of month")?
        .parse()
        .map_err(|_| RowIssue::NotANumber("day of month"))?;
    if !(1..=31).contains(&day_of_month) {
        return Err(RowIssue::DayOutOfRange(day_of_month));
    }
    let color = field(columns.color, "color")?;
    let logo = field(columns.logo, "logo")?;
    let start_date = parse_date(field(columns.start_date, "start date")?, locale, now);

    // A malformed end date must not silently end the subscription today, so
    // it degrades to "no end" rather than through the parser fallback.
    let end_date = columns
        .end_date
        .and_then(|index| field(index, "end date").ok())
        .and_then(|raw| match try_parse_date(raw, locale) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(row = id, raw, %err, "ignoring unparseable end date");
                None
            }
        });

    Ok(Subscription {
        id,
        name: name.to_string(),
        amount,
        currency: currency.to_string(),
        frequency,
        day_of_month,
        start_date,
        end_date,
        color: color.to_string(),
        logo: logo.to_string(),
    })
}

/// Built-in sample data for demo mode and offline use.
static DEMO_SUBSCRIPTIONS: Lazy<Vec<Subscription>> = Lazy::new(|| {
    let demo = |id, name: &str, amount, day_of_month, color: &str, logo: &str, start| {
        Subscription {
            id,
            name: name.to_string(),
            amount,
            currency: "€".to_string(),
            frequency: Frequency::Monthly,
            day_of_month,
            start_date: start,
            end_date: None,
            color: color.to_string(),
            logo: logo.to_string(),
        }
    };
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    vec![
        demo(1, "Netflix", 4.33, 7, "#E50914", "N", date(2021, 1, 1)),
        demo(2, "Spotify", 9.99, 12, "#1DB954", "S", date(2022, 3, 15)),
        demo(3, "Amazon Prime", 7.99, 30, "#FF9900", "a", date(2021, 11, 20)),
        demo(4, "LinkedIn", 29.99, 24, "#0077B5", "in", date(2023, 5, 1)),
        demo(5, "Airbnb", 12.99, 7, "#FF5A5F", "A", date(2022, 7, 12)),
    ]
});

pub fn demo_subscriptions() -> Vec<Subscription> {
    DEMO_SUBSCRIPTIONS.clone()
}
