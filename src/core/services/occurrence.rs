//! Decides whether a subscription charges in a given month and projects the
//! next concrete charge date.

use chrono::{Datelike, NaiveDate};

use crate::dates::days_in_month;
use crate::domain::{Frequency, Subscription};

pub struct OccurrenceService;

impl OccurrenceService {
    /// True iff a subscription with this frequency and start date charges in
    /// the given month. Sub-monthly cadences are flagged as active for the
    /// whole month rather than projected onto individual weeks or days.
    pub fn occurs_in_month(
        frequency: Frequency,
        start_date: NaiveDate,
        month: u32,
        year: i32,
    ) -> bool {
        let total_months_diff =
            (year - start_date.year()) * 12 + (month as i32 - start_date.month() as i32);
        if total_months_diff < 0 {
            return false;
        }
        match frequency {
            Frequency::Monthly | Frequency::Weekly | Frequency::Biweekly | Frequency::Daily => true,
            Frequency::Yearly => month == start_date.month() && total_months_diff % 12 == 0,
            Frequency::Quarterly => total_months_diff % 3 == 0,
            Frequency::Biannually => total_months_diff % 6 == 0,
        }
    }

    /// The nominal charge day clamped into the target month. A `dayOfMonth`
    /// of 31 charges on February 29 in leap years and February 28 otherwise.
    pub fn charge_day(day_of_month: u32, month: u32, year: i32) -> u32 {
        day_of_month.clamp(1, days_in_month(year, month))
    }

    /// Occurrence check for a full record: frequency periodicity plus the
    /// record's start and end bounds.
    pub fn charges_in_month(subscription: &Subscription, month: u32, year: i32) -> bool {
        if !Self::occurs_in_month(subscription.frequency, subscription.start_date, month, year) {
            return false;
        }
        match subscription.end_date {
            Some(end) => charge_date(year, month, subscription.day_of_month) <= end,
            None => true,
        }
    }

    /// Next concrete date the subscription charges, relative to `today`.
    /// `None` once the subscription's end date has passed.
    pub fn next_charge_date(subscription: &Subscription, today: NaiveDate) -> Option<NaiveDate> {
        let candidate = match subscription.frequency {
            Frequency::Yearly => next_yearly(subscription, today),
            Frequency::Quarterly => next_phase_aligned(subscription, today, 3),
            Frequency::Biannually => next_phase_aligned(subscription, today, 6),
            // Monthly and the sub-monthly cadences all land on the next
            // nominal charge day.
            _ => next_monthly(subscription, today),
        };
        match subscription.end_date {
            Some(end) if candidate > end => None,
            _ => Some(candidate),
        }
    }
}

fn charge_date(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    let day = OccurrenceService::charge_day(day_of_month, month, year);
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A charge day that is today or already past moves to the next month.
fn next_monthly(subscription: &Subscription, today: NaiveDate) -> NaiveDate {
    let day = OccurrenceService::charge_day(subscription.day_of_month, today.month(), today.year());
    if day <= today.day() {
        let (year, month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        charge_date(year, month, subscription.day_of_month)
    } else {
        charge_date(today.year(), today.month(), subscription.day_of_month)
    }
}

/// Yearly charges keep the start date's month; a same-day candidate counts
/// as still upcoming.
fn next_yearly(subscription: &Subscription, today: NaiveDate) -> NaiveDate {
    let month = subscription.start_date.month();
    let this_year = charge_date(today.year(), month, subscription.day_of_month);
    let passed = month < today.month() || (month == today.month() && this_year.day() < today.day());
    if passed {
        charge_date(today.year() + 1, month, subscription.day_of_month)
    } else {
        this_year
    }
}

/// Quarterly/biannual charges align to the start month's position within its
/// cycle. Year rollover falls out of the flat month index.
fn next_phase_aligned(subscription: &Subscription, today: NaiveDate, cycle_months: u32) -> NaiveDate {
    let phase = subscription.start_date.month0() % cycle_months;
    let current_cycle = today.month0() / cycle_months;
    let month_in_cycle = today.month0() % cycle_months;

    let target = if month_in_cycle > phase
        || (month_in_cycle == phase && today.day() > subscription.day_of_month)
    {
        (current_cycle + 1) * cycle_months + phase
    } else {
        current_cycle * cycle_months + phase
    };

    let year = today.year() + (target / 12) as i32;
    charge_date(year, target % 12 + 1, subscription.day_of_month)
}
