//! Currency canonicalization and locale-aware amount formatting.
//!
//! This is a formatting boundary only: subscription records keep their source
//! currency value, and the `€` symbol found in sheet data canonicalizes to
//! `EUR` here.

use serde::{Deserialize, Serialize};

/// ISO 4217-style currency code used for formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("EUR")
    }
}

/// Canonicalizes a source currency value for formatting: `€` becomes `EUR`,
/// other values are uppercased, and an empty value falls back to `EUR`.
pub fn canonical_code(raw: &str) -> CurrencyCode {
    let trimmed = raw.trim().replace('€', "EUR");
    if trimmed.is_empty() {
        CurrencyCode::default()
    } else {
        CurrencyCode::new(trimmed)
    }
}

/// Decimal and grouping separator conventions, keyed by language prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

pub fn number_format_for(locale: &str) -> NumberFormat {
    let language = locale.split('-').next().unwrap_or_default();
    match language {
        "de" | "es" | "it" | "nl" | "pt" => NumberFormat {
            decimal_separator: ',',
            grouping_separator: '.',
        },
        "fr" => NumberFormat {
            decimal_separator: ',',
            grouping_separator: ' ',
        },
        _ => NumberFormat {
            decimal_separator: '.',
            grouping_separator: ',',
        },
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats an amount in the subscription's stated currency for the locale:
/// `format_amount(4.33, "€", "de-AT")` renders `"4,33 €"`, while an `en-US`
/// caller sees `"€4.33"`.
pub fn format_amount(amount: f64, raw_currency: &str, locale: &str) -> String {
    let code = canonical_code(raw_currency);
    let format = number_format_for(locale);
    let precision = minor_units_for(code.as_str());
    let mut body = format_number(format, amount.abs(), precision);
    if amount < 0.0 {
        body = format!("-{body}");
    }
    let symbol = symbol_for(code.as_str());
    if format.decimal_separator == ',' {
        format!("{body} {symbol}")
    } else {
        format!("{symbol}{body}")
    }
}

fn format_number(format: NumberFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (body, None),
    };
    let grouped = group_digits(&int_part, format.grouping_separator);
    match frac_part {
        Some(frac) => format!("{grouped}{}{frac}", format.decimal_separator),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
