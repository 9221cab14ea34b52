//! Historical charge counting and cumulative spend.

use chrono::{Datelike, NaiveDate};

use crate::core::services::OccurrenceService;
use crate::dates::months_between;
use crate::domain::{Frequency, Subscription};

pub struct AccrualService;

impl AccrualService {
    /// Number of charges that have occurred from the start date up to `now`,
    /// inclusive of a charge due today and exclusive of the future. Clamped
    /// to zero, so a `now` before the start date never goes negative.
    pub fn payments_since_start(subscription: &Subscription, now: NaiveDate) -> u32 {
        // Charges stop accruing at the end date when one is set.
        let effective = match subscription.end_date {
            Some(end) if end < now => end,
            _ => now,
        };
        if effective < subscription.start_date {
            return 0;
        }

        let months = months_between(subscription.start_date, effective) as i64;
        let days = (effective - subscription.start_date).num_days();
        let count = match subscription.frequency {
            Frequency::Monthly => {
                let due_day = OccurrenceService::charge_day(
                    subscription.day_of_month,
                    effective.month(),
                    effective.year(),
                );
                if effective.day() < due_day {
                    months - 1
                } else {
                    months
                }
            }
            Frequency::Yearly => {
                let anniversary_day = OccurrenceService::charge_day(
                    subscription.day_of_month,
                    subscription.start_date.month(),
                    effective.year(),
                );
                let reached = effective.month() > subscription.start_date.month()
                    || (effective.month() == subscription.start_date.month()
                        && effective.day() >= anniversary_day);
                let completed = (effective.year() - subscription.start_date.year()) as i64 - 1;
                if reached {
                    completed + 1
                } else {
                    completed
                }
            }
            Frequency::Quarterly => months / 3,
            Frequency::Biannually => months / 6,
            Frequency::Weekly => days / 7,
            Frequency::Biweekly => days / 14,
            Frequency::Daily => days,
        };
        count.max(0) as u32
    }

    /// Cumulative amount paid since the start date: elapsed charge count
    /// times the per-charge amount. Informational display only.
    pub fn total_spent(subscription: &Subscription, now: NaiveDate) -> f64 {
        Self::payments_since_start(subscription, now) as f64 * subscription.amount
    }
}
