//! Month-level aggregation: per-day charge map, frequency-aware totals,
//! spending trends, and chart share segments. Everything here is derived on
//! demand from the subscription list and never cached across renders.

use chrono::NaiveDate;

use crate::core::services::OccurrenceService;
use crate::domain::Subscription;

pub struct SummaryService;

/// Charges grouped under one day of the displayed month.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCharges<'a> {
    pub day: u32,
    pub subscriptions: Vec<&'a Subscription>,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotal {
    pub month: u32,
    pub year: i32,
    pub total: f64,
}

/// Previous/current/next month totals with change percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    pub previous: MonthTotal,
    pub current: MonthTotal,
    pub next: MonthTotal,
    pub previous_to_current_pct: f64,
    pub current_to_next_pct: f64,
}

/// One slice of the spending breakdown, angles over a full 360° circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    pub subscription_id: u32,
    pub name: String,
    pub color: String,
    pub amount: f64,
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl SummaryService {
    /// Subscriptions charging on the given day of the displayed month. The
    /// nominal charge day is clamped, so a day-31 subscription shows up on
    /// the last day of February.
    pub fn subscriptions_for_day<'a>(
        subscriptions: &'a [Subscription],
        day: u32,
        month: u32,
        year: i32,
    ) -> Vec<&'a Subscription> {
        subscriptions
            .iter()
            .filter(|sub| OccurrenceService::charge_day(sub.day_of_month, month, year) == day)
            .filter(|sub| OccurrenceService::charges_in_month(sub, month, year))
            .collect()
    }

    /// Sum of charges that actually occur in the month, per frequency.
    pub fn monthly_total(subscriptions: &[Subscription], month: u32, year: i32) -> f64 {
        subscriptions
            .iter()
            .filter(|sub| OccurrenceService::charges_in_month(sub, month, year))
            .map(|sub| sub.amount)
            .sum()
    }

    /// Per-day breakdown of the month, listing only days with charges,
    /// ascending by day.
    pub fn day_breakdown<'a>(
        subscriptions: &'a [Subscription],
        month: u32,
        year: i32,
    ) -> Vec<DayCharges<'a>> {
        let days = crate::dates::days_in_month(year, month);
        let mut breakdown = Vec::new();
        for day in 1..=days {
            let charging = Self::subscriptions_for_day(subscriptions, day, month, year);
            if charging.is_empty() {
                continue;
            }
            let total = charging.iter().map(|sub| sub.amount).sum();
            breakdown.push(DayCharges {
                day,
                subscriptions: charging,
                total,
            });
        }
        breakdown
    }

    /// Totals for the displayed month and its neighbors, with change
    /// percentages. A zero previous month reads as +100%; a zero current
    /// month reads as 0% toward the next.
    pub fn trend_summary(subscriptions: &[Subscription], month: u32, year: i32) -> TrendSummary {
        let (prev_month, prev_year) = if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        };
        let (next_month, next_year) = if month == 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        };

        let previous = MonthTotal {
            month: prev_month,
            year: prev_year,
            total: Self::monthly_total(subscriptions, prev_month, prev_year),
        };
        let current = MonthTotal {
            month,
            year,
            total: Self::monthly_total(subscriptions, month, year),
        };
        let next = MonthTotal {
            month: next_month,
            year: next_year,
            total: Self::monthly_total(subscriptions, next_month, next_year),
        };

        let previous_to_current_pct = if previous.total == 0.0 {
            100.0
        } else {
            (current.total - previous.total) / previous.total * 100.0
        };
        let current_to_next_pct = if current.total == 0.0 {
            0.0
        } else {
            (next.total - current.total) / current.total * 100.0
        };

        TrendSummary {
            previous,
            current,
            next,
            previous_to_current_pct,
            current_to_next_pct,
        }
    }

    /// Share-of-spend segments sorted by descending amount. Zero and
    /// negative amounts are excluded; an empty or zero-total list yields no
    /// segments.
    pub fn chart_segments(subscriptions: &[Subscription]) -> Vec<ChartSegment> {
        let mut valid: Vec<&Subscription> =
            subscriptions.iter().filter(|sub| sub.amount > 0.0).collect();
        let total: f64 = valid.iter().map(|sub| sub.amount).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        valid.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let mut segments = Vec::with_capacity(valid.len());
        let mut cumulative = 0.0;
        for sub in valid {
            let percentage = sub.amount / total * 100.0;
            let start_angle = cumulative / 100.0 * 360.0;
            cumulative += percentage;
            let end_angle = cumulative / 100.0 * 360.0;
            segments.push(ChartSegment {
                subscription_id: sub.id,
                name: sub.name.clone(),
                color: sub.color.clone(),
                amount: sub.amount,
                percentage,
                start_angle,
                end_angle,
            });
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Frequency;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample() -> Vec<Subscription> {
        vec![
            Subscription::new(1, "Netflix", 4.33, Frequency::Monthly, 7, date(2021, 1, 1)),
            Subscription::new(2, "Spotify", 9.99, Frequency::Monthly, 12, date(2022, 3, 15)),
            Subscription::new(3, "Prime", 7.99, Frequency::Monthly, 30, date(2021, 11, 20)),
            Subscription::new(4, "Domain", 12.0, Frequency::Yearly, 7, date(2022, 7, 12)),
        ]
    }

    #[test]
    fn groups_subscriptions_by_charge_day() {
        let subs = sample();
        let on_seventh = SummaryService::subscriptions_for_day(&subs, 7, 7, 2024);
        let names: Vec<_> = on_seventh.iter().map(|sub| sub.name.as_str()).collect();
        assert_eq!(names, vec!["Netflix", "Domain"]);

        // Outside July, the yearly subscription disappears from day 7.
        let in_june = SummaryService::subscriptions_for_day(&subs, 7, 6, 2024);
        assert_eq!(in_june.len(), 1);
    }

    #[test]
    fn clamped_charge_days_land_on_the_last_of_february() {
        let subs = sample();
        let feb29 = SummaryService::subscriptions_for_day(&subs, 29, 2, 2024);
        assert_eq!(feb29.len(), 1);
        assert_eq!(feb29[0].name, "Prime");
        // Day 30 does not exist in February, so nothing matches it.
        assert!(SummaryService::subscriptions_for_day(&subs, 30, 2, 2024).is_empty());
    }

    #[test]
    fn monthly_total_is_frequency_aware() {
        let subs = sample();
        let june = SummaryService::monthly_total(&subs, 6, 2024);
        assert!((june - (4.33 + 9.99 + 7.99)).abs() < 1e-9);
        let july = SummaryService::monthly_total(&subs, 7, 2024);
        assert!((july - (4.33 + 9.99 + 7.99 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn day_breakdown_lists_only_active_days_in_order() {
        let subs = sample();
        let breakdown = SummaryService::day_breakdown(&subs, 6, 2024);
        let days: Vec<_> = breakdown.iter().map(|entry| entry.day).collect();
        assert_eq!(days, vec![7, 12, 30]);
        assert!((breakdown[0].total - 4.33).abs() < 1e-9);
    }

    #[test]
    fn trend_summary_tracks_neighboring_months() {
        let subs = sample();
        let trends = SummaryService::trend_summary(&subs, 6, 2024);
        assert_eq!(trends.previous.month, 5);
        assert_eq!(trends.next.month, 7);
        assert!(trends.current_to_next_pct > 0.0);
        assert!((trends.previous.total - trends.current.total).abs() < 1e-9);
        assert!(trends.previous_to_current_pct.abs() < 1e-9);

        let december = SummaryService::trend_summary(&subs, 12, 2024);
        assert_eq!(december.next.month, 1);
        assert_eq!(december.next.year, 2025);
    }

    #[test]
    fn trend_percentages_handle_zero_baselines() {
        let late_start = vec![Subscription::new(
            1,
            "New",
            10.0,
            Frequency::Monthly,
            1,
            date(2024, 6, 1),
        )];
        let trends = SummaryService::trend_summary(&late_start, 6, 2024);
        assert_eq!(trends.previous.total, 0.0);
        assert_eq!(trends.previous_to_current_pct, 100.0);

        let none: Vec<Subscription> = Vec::new();
        let empty = SummaryService::trend_summary(&none, 6, 2024);
        assert_eq!(empty.current_to_next_pct, 0.0);
    }

    #[test]
    fn chart_segments_cover_the_full_circle_in_descending_order() {
        let subs = sample();
        let segments = SummaryService::chart_segments(&subs);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].name, "Domain");
        assert!(segments.windows(2).all(|w| w[0].amount >= w[1].amount));
        assert!(segments[0].start_angle.abs() < 1e-9);
        assert!((segments.last().unwrap().end_angle - 360.0).abs() < 1e-9);
        let pct: f64 = segments.iter().map(|s| s.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn chart_segments_skip_non_positive_amounts() {
        let mut subs = sample();
        subs.push(Subscription::new(
            9,
            "Free",
            0.0,
            Frequency::Monthly,
            1,
            date(2024, 1, 1),
        ));
        assert_eq!(SummaryService::chart_segments(&subs).len(), 4);
        assert!(SummaryService::chart_segments(&[]).is_empty());
    }
}
