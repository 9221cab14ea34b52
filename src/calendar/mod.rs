//! Month grid construction for calendar rendering.

use chrono::{Datelike, NaiveDate};

use crate::dates::locale::{adjust_day_of_week, first_day_of_week};
use crate::dates::days_in_month;

/// Cells per grid: six full weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid. Ephemeral, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub is_current_month: bool,
    pub is_prev_month: bool,
    pub is_next_month: bool,
    pub is_today: bool,
}

/// Builds the 42-cell grid for the given month: the full displayed month plus
/// spillover from adjacent months so every week row is complete. The first
/// column follows the locale's first-day-of-week convention; `is_today` is
/// set for at most one current-month cell.
pub fn build_grid(month: u32, year: i32, locale: &str, today: NaiveDate) -> Vec<CalendarDay> {
    let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let lead = adjust_day_of_week(first_weekday, first_day_of_week(locale));

    let days = days_in_month(year, month);
    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let days_in_prev = days_in_month(prev_year, prev_month);

    let mut grid = Vec::with_capacity(GRID_CELLS);
    for offset in 0..lead {
        grid.push(CalendarDay {
            day: days_in_prev - lead + 1 + offset,
            month: prev_month,
            year: prev_year,
            is_current_month: false,
            is_prev_month: true,
            is_next_month: false,
            is_today: false,
        });
    }
    for day in 1..=days {
        grid.push(CalendarDay {
            day,
            month,
            year,
            is_current_month: true,
            is_prev_month: false,
            is_next_month: false,
            is_today: today.day() == day && today.month() == month && today.year() == year,
        });
    }
    let mut day = 1;
    while grid.len() < GRID_CELLS {
        grid.push(CalendarDay {
            day,
            month: next_month,
            year: next_year,
            is_current_month: false,
            is_prev_month: false,
            is_next_month: true,
            is_today: false,
        });
        day += 1;
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn grid_always_has_42_cells() {
        for (month, year) in [(1, 2024), (2, 2024), (2, 2023), (6, 2024), (12, 2025)] {
            for locale in ["en-US", "de-AT"] {
                assert_eq!(build_grid(month, year, locale, today()).len(), GRID_CELLS);
            }
        }
    }

    #[test]
    fn current_month_cell_count_matches_days_in_month() {
        let grid = build_grid(2, 2024, "de-AT", today());
        assert_eq!(grid.iter().filter(|c| c.is_current_month).count(), 29);
        let grid = build_grid(6, 2024, "en-US", today());
        assert_eq!(grid.iter().filter(|c| c.is_current_month).count(), 30);
    }

    #[test]
    fn membership_flags_are_mutually_exclusive() {
        for cell in build_grid(6, 2024, "de-AT", today()) {
            let set = [cell.is_prev_month, cell.is_current_month, cell.is_next_month]
                .iter()
                .filter(|flag| **flag)
                .count();
            assert_eq!(set, 1);
        }
    }

    #[test]
    fn first_column_follows_locale() {
        // June 2024 starts on a Saturday.
        let us = build_grid(6, 2024, "en-US", today());
        assert!(us[6].is_current_month && us[6].day == 1);
        assert_eq!(us[0].day, 26); // May 26, Sunday

        let at = build_grid(6, 2024, "de-AT", today());
        assert!(at[5].is_current_month && at[5].day == 1);
        assert_eq!(at[0].day, 27); // May 27, Monday
    }

    #[test]
    fn at_most_one_cell_is_today() {
        let shown = build_grid(6, 2024, "de-AT", today());
        let marked: Vec<_> = shown.iter().filter(|c| c.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day, 10);

        // Today outside the displayed month marks nothing.
        let other = build_grid(9, 2024, "de-AT", today());
        assert!(other.iter().all(|c| !c.is_today));
    }

    #[test]
    fn spillover_wraps_across_year_boundaries() {
        let grid = build_grid(1, 2024, "en-US", today());
        let prev: Vec<_> = grid.iter().filter(|c| c.is_prev_month).collect();
        assert!(prev.iter().all(|c| c.month == 12 && c.year == 2023));

        let grid = build_grid(12, 2024, "en-US", today());
        let next: Vec<_> = grid.iter().filter(|c| c.is_next_month).collect();
        assert!(next.iter().all(|c| c.month == 1 && c.year == 2025));
    }
}
