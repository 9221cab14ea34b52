//! End-to-end flow: raw sheet rows through ingestion, occurrence matching,
//! grid construction, and accrued totals.

use chrono::NaiveDate;

use subcal::calendar::{build_grid, GRID_CELLS};
use subcal::core::services::{AccrualService, OccurrenceService, SummaryService};
use subcal::dates::format_iso;
use subcal::domain::Frequency;
use subcal::ingest::{parse_rows, SheetTable};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sheet() -> SheetTable {
    let rows: Vec<Vec<&str>> = vec![
        vec![
            "Name", "Amount", "Currency", "Frequency", "Day of Month", "Color", "Logo",
            "Start Date", "End Date",
        ],
        vec!["Netflix", "4.33", "€", "monthly", "7", "#E50914", "N", "2021-01-01", ""],
        vec!["Spotify", "9.99", "€", "monthly", "12", "#1DB954", "S", "15.3.2022", ""],
        vec!["Hosting", "120", "€", "annual", "7", "#333333", "H", "2022-07-12", ""],
        vec!["Gym", "90", "€", "quarter", "1", "#00AA55", "G", "2023-01-01", ""],
        vec!["Paper", "30", "€", "half-yearly", "28", "#AA0055", "P", "2023-02-28", ""],
        vec!["Trial", "2", "€", "monthly", "15", "#777777", "T", "2024-01-01", "2024-05-31"],
    ];
    SheetTable {
        values: rows
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect(),
    }
}

#[test]
fn full_month_view_from_raw_rows() {
    let today = date(2024, 7, 10);
    let subscriptions = parse_rows(&sheet(), "de-AT", today).expect("rows parse");
    assert_eq!(subscriptions.len(), 6);

    // Free-text frequencies were canonicalized during ingestion.
    assert_eq!(subscriptions[2].frequency, Frequency::Yearly);
    assert_eq!(subscriptions[3].frequency, Frequency::Quarterly);
    assert_eq!(subscriptions[4].frequency, Frequency::Biannually);
    // The day-first start date survived the locale-aware parse.
    assert_eq!(format_iso(subscriptions[1].start_date), "2022-03-15");

    // July 2024: monthly charges, the hosting anniversary, and the
    // phase-aligned quarterly charge all land; the ended trial does not.
    let on_seventh = SummaryService::subscriptions_for_day(&subscriptions, 7, 7, 2024);
    let names: Vec<_> = on_seventh.iter().map(|sub| sub.name.as_str()).collect();
    assert_eq!(names, vec!["Netflix", "Hosting"]);
    assert!(SummaryService::subscriptions_for_day(&subscriptions, 15, 7, 2024).is_empty());

    let total = SummaryService::monthly_total(&subscriptions, 7, 2024);
    assert!((total - (4.33 + 9.99 + 120.0 + 90.0)).abs() < 1e-9);

    // August drops the yearly and quarterly charges but picks up the
    // half-yearly one on the 28th.
    let august = SummaryService::day_breakdown(&subscriptions, 8, 2024);
    let days: Vec<_> = august.iter().map(|entry| entry.day).collect();
    assert_eq!(days, vec![7, 12, 28]);
    assert!((SummaryService::monthly_total(&subscriptions, 8, 2024)
        - (4.33 + 9.99 + 30.0))
        .abs()
        < 1e-9);
}

#[test]
fn grid_and_charges_line_up() {
    let today = date(2024, 7, 10);
    let subscriptions = parse_rows(&sheet(), "de-AT", today).expect("rows parse");
    let grid = build_grid(7, 2024, "de-AT", today);
    assert_eq!(grid.len(), GRID_CELLS);

    let charged_days: Vec<u32> = grid
        .iter()
        .filter(|cell| cell.is_current_month)
        .filter(|cell| {
            !SummaryService::subscriptions_for_day(&subscriptions, cell.day, 7, 2024).is_empty()
        })
        .map(|cell| cell.day)
        .collect();
    assert_eq!(charged_days, vec![1, 7, 12]);

    let today_cells: Vec<_> = grid.iter().filter(|cell| cell.is_today).collect();
    assert_eq!(today_cells.len(), 1);
    assert_eq!(today_cells[0].day, 10);
}

#[test]
fn accrued_totals_follow_the_frequency_rules() {
    let today = date(2024, 7, 10);
    let subscriptions = parse_rows(&sheet(), "de-AT", today).expect("rows parse");

    let netflix = &subscriptions[0];
    assert_eq!(AccrualService::payments_since_start(netflix, today), 42);

    // The trial stopped accruing at its end date.
    let trial = &subscriptions[5];
    assert_eq!(AccrualService::payments_since_start(trial, today), 4);
    assert!((AccrualService::total_spent(trial, today) - 8.0).abs() < 1e-9);

    // Projection agrees with the month view: the next hosting charge is the
    // displayed July anniversary.
    let hosting = &subscriptions[2];
    assert_eq!(
        OccurrenceService::next_charge_date(hosting, today),
        Some(date(2025, 7, 7))
    );
}
