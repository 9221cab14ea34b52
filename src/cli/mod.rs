//! One-shot command line surface: loads settings and subscription rows, then
//! renders the month view to stdout.

pub mod render;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use crate::config::ConfigManager;
use crate::dates::try_parse_date;
use crate::errors::SubcalError;
use crate::ingest;

const USAGE: &str = "\
subcal_cli - subscription calendar

USAGE:
  subcal_cli [OPTIONS]

OPTIONS:
  --month YYYY-MM      month to display (default: current month)
  --locale TAG         locale tag, e.g. de-AT or en-US (default: saved setting)
  --file PATH          sheet payload file with {\"values\": [...]} rows
  --demo               use the built-in demo subscriptions
  --today YYYY-MM-DD   reference date override
  --details            print a detail card per subscription
  --help               show this help
";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliOptions {
    pub month: Option<(u32, i32)>,
    pub locale: Option<String>,
    pub file: Option<PathBuf>,
    pub demo: bool,
    pub today: Option<NaiveDate>,
    pub details: bool,
}

/// Entry point for the binary. Reads `std::env::args`; everything below the
/// argument layer takes `today` as an explicit parameter.
pub fn run_cli() -> Result<(), SubcalError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        print!("{USAGE}");
        return Ok(());
    };
    let output = execute(&options)?;
    print!("{output}");
    Ok(())
}

/// Runs the selected view and returns the rendered output.
pub fn execute(options: &CliOptions) -> Result<String, SubcalError> {
    // Settings are best effort: a missing or unreadable config file must not
    // take the calendar down.
    let config = ConfigManager::new()
        .and_then(|manager| manager.load())
        .unwrap_or_default();

    let locale = options
        .locale
        .clone()
        .unwrap_or_else(|| config.locale.clone());
    let today = options
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let (month, year) = options.month.unwrap_or((today.month(), today.year()));

    let subscriptions = match (options.demo, options.file.as_ref()) {
        (true, _) => ingest::demo_subscriptions(),
        (false, Some(path)) => ingest::load_subscriptions(path, &locale, today)?,
        (false, None) => match (&config.data_file, config.demo_mode) {
            (Some(path), false) => ingest::load_subscriptions(path, &locale, today)?,
            _ => ingest::demo_subscriptions(),
        },
    };

    let mut output = String::new();
    output.push_str(&render::render_month(
        &subscriptions,
        month,
        year,
        &locale,
        today,
    ));
    output.push_str(&render::render_summary(&subscriptions, month, year, &locale));
    output.push_str(&render::render_trends(&subscriptions, month, year, &locale));
    if options.details {
        for subscription in &subscriptions {
            output.push_str(&render::render_detail(subscription, &locale, today));
        }
    }
    Ok(output)
}

/// Parses command line flags. `Ok(None)` means help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<CliOptions>, SubcalError> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--demo" => options.demo = true,
            "--details" => options.details = true,
            "--month" => {
                let value = expect_value(iter.next(), "--month")?;
                options.month = Some(parse_month(value)?);
            }
            "--locale" => {
                options.locale = Some(expect_value(iter.next(), "--locale")?.to_string());
            }
            "--file" => {
                options.file = Some(PathBuf::from(expect_value(iter.next(), "--file")?));
            }
            "--today" => {
                let value = expect_value(iter.next(), "--today")?;
                let date = try_parse_date(value, "en-US")
                    .map_err(|err| SubcalError::Invalid(format!("--today: {err}")))?;
                options.today = Some(date);
            }
            other => {
                return Err(SubcalError::Invalid(format!(
                    "unknown argument `{other}`, try --help"
                )));
            }
        }
    }
    Ok(Some(options))
}

fn expect_value<'a>(value: Option<&'a String>, flag: &str) -> Result<&'a str, SubcalError> {
    value
        .map(String::as_str)
        .ok_or_else(|| SubcalError::Invalid(format!("{flag} expects a value")))
}

fn parse_month(raw: &str) -> Result<(u32, i32), SubcalError> {
    let invalid = || SubcalError::Invalid(format!("--month expects YYYY-MM, got `{raw}`"));
    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((month, year))
}
