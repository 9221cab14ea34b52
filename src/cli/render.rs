//! Text rendering of the calendar grid, summary table, trends, and the
//! per-subscription detail card.

use chrono::NaiveDate;
use colored::Colorize;

use crate::calendar::build_grid;
use crate::core::services::{AccrualService, OccurrenceService, SummaryService};
use crate::currency::format_amount;
use crate::dates::locale::{
    first_day_of_week, format_date_display, month_name, reorder_weekday_labels, weekday_labels,
};
use crate::domain::Subscription;

/// Icons shown per day cell before collapsing into a `+n` marker.
const MAX_VISIBLE_ICONS: usize = 2;
const CELL_WIDTH: usize = 9;

/// Renders the month header, weekday labels, and the 6x7 day grid. Today is
/// highlighted; spillover days are dimmed.
pub fn render_month(
    subscriptions: &[Subscription],
    month: u32,
    year: i32,
    locale: &str,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let title = format!("{} {}", month_name(month, locale), year);
    out.push_str(&format!("{}\n", title.bold()));

    let total = SummaryService::monthly_total(subscriptions, month, year);
    let spend = format_amount(total, display_currency(subscriptions), locale);
    out.push_str(&format!("Monthly spend: {}\n\n", spend.bold()));

    let labels = reorder_weekday_labels(weekday_labels(locale), first_day_of_week(locale));
    for label in &labels {
        out.push_str(&pad(label, CELL_WIDTH));
    }
    out.push('\n');

    let grid = build_grid(month, year, locale, today);
    for week in grid.chunks(7) {
        for cell in week {
            let icons = if cell.is_current_month {
                let charging =
                    SummaryService::subscriptions_for_day(subscriptions, cell.day, month, year);
                icon_string(&charging)
            } else {
                String::new()
            };
            let body = pad(&format!("{:>2} {}", cell.day, icons), CELL_WIDTH);
            if cell.is_today {
                out.push_str(&body.reversed().to_string());
            } else if !cell.is_current_month {
                out.push_str(&body.dimmed().to_string());
            } else {
                out.push_str(&body);
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the per-day summary table for days with charges.
pub fn render_summary(
    subscriptions: &[Subscription],
    month: u32,
    year: i32,
    locale: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Monthly Summary".bold()));
    let breakdown = SummaryService::day_breakdown(subscriptions, month, year);
    if breakdown.is_empty() {
        out.push_str("No subscriptions charge this month\n");
        return out;
    }
    let currency = display_currency(subscriptions);
    for entry in &breakdown {
        let names: Vec<&str> = entry
            .subscriptions
            .iter()
            .map(|sub| sub.name.as_str())
            .collect();
        out.push_str(&format!(
            "{:>3}  {:<42} {:>12}\n",
            entry.day,
            names.join(", "),
            format_amount(entry.total, currency, locale)
        ));
    }
    out
}

/// Renders previous/current/next month totals with change indicators.
pub fn render_trends(
    subscriptions: &[Subscription],
    month: u32,
    year: i32,
    locale: &str,
) -> String {
    let trends = SummaryService::trend_summary(subscriptions, month, year);
    let currency = display_currency(subscriptions);
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Spending Trends".bold()));
    out.push_str(&format!(
        "{:<5} {:>12}\n",
        short_month(trends.previous.month, locale),
        format_amount(trends.previous.total, currency, locale)
    ));
    out.push_str(&format!(
        "{:<5} {:>12} {} {:+.1}%\n",
        short_month(trends.current.month, locale),
        format_amount(trends.current.total, currency, locale),
        indicator(trends.previous_to_current_pct),
        trends.previous_to_current_pct
    ));
    out.push_str(&format!(
        "{:<5} {:>12} {} {:+.1}%\n",
        short_month(trends.next.month, locale),
        format_amount(trends.next.total, currency, locale),
        indicator(trends.current_to_next_pct),
        trends.current_to_next_pct
    ));
    out
}

/// Renders one subscription's detail card: cadence, next payment, total
/// spent since the start date.
pub fn render_detail(subscription: &Subscription, locale: &str, today: NaiveDate) -> String {
    let currency = subscription.currency.as_str();
    let amount = format_amount(subscription.amount, currency, locale);
    let monthly = format_amount(subscription.monthly_equivalent(), currency, locale);
    let next = match OccurrenceService::next_charge_date(subscription, today) {
        Some(date) => format_date_display(date, locale),
        None => "ended".to_string(),
    };
    let spent = format_amount(
        AccrualService::total_spent(subscription, today),
        currency,
        locale,
    );

    let mut out = String::new();
    out.push_str(&format!(
        "\n{}  {}\n",
        subscription.name.bold(),
        amount.bold()
    ));
    out.push_str(&format!(
        "  {}\n",
        subscription.frequency.describe(&amount, &monthly)
    ));
    out.push_str(&format!(
        "  Every {}{}, {}\n",
        subscription.day_of_month,
        ordinal_suffix(subscription.day_of_month),
        subscription.frequency.label()
    ));
    out.push_str(&format!(
        "  Next: {}   Since {}\n",
        next,
        format_date_display(subscription.start_date, locale)
    ));
    out.push_str(&format!("  Total spent: {spent}\n"));
    out
}

fn display_currency(subscriptions: &[Subscription]) -> &str {
    subscriptions
        .first()
        .map(|sub| sub.currency.as_str())
        .unwrap_or("EUR")
}

fn icon_string(charging: &[&Subscription]) -> String {
    let mut icons = charging
        .iter()
        .take(MAX_VISIBLE_ICONS)
        .map(|sub| sub.logo.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let hidden = charging.len().saturating_sub(MAX_VISIBLE_ICONS);
    if hidden > 0 {
        icons.push_str(&format!(" +{hidden}"));
    }
    icons.chars().take(CELL_WIDTH - 4).collect()
}

fn pad(text: &str, width: usize) -> String {
    let length = text.chars().count();
    let mut padded = text.to_string();
    for _ in length..width {
        padded.push(' ');
    }
    padded
}

fn short_month(month: u32, locale: &str) -> String {
    month_name(month, locale).chars().take(3).collect()
}

fn indicator(change: f64) -> &'static str {
    if change == 0.0 {
        "•"
    } else if change > 0.0 {
        "▲"
    } else {
        "▼"
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
