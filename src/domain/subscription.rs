use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Frequency;

/// A normalized subscription record. Created once per ingestion pass and
/// read-only afterwards; the occurrence and accrual services never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    /// Row position in the source sheet, 1-based over the data rows.
    pub id: u32,
    pub name: String,
    /// Charge amount per occurrence, not a monthly equivalent.
    pub amount: f64,
    /// Currency as stated in the source; canonicalized only for formatting.
    pub currency: String,
    pub frequency: Frequency,
    /// Nominal charge day, 1-31. Clamped into short months at use sites.
    pub day_of_month: u32,
    pub start_date: NaiveDate,
    /// No charges occur after this date when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Presentation only, opaque to the engine.
    pub color: String,
    pub logo: String,
}

impl Subscription {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        day_of_month: u32,
        start_date: NaiveDate,
    ) -> Self {
        let name = name.into();
        let logo = name.chars().next().map(String::from).unwrap_or_default();
        Self {
            id,
            name,
            amount,
            currency: "EUR".into(),
            frequency,
            day_of_month,
            start_date,
            end_date: None,
            color: "#888888".into(),
            logo,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Monthly-equivalent cost of this subscription, for display.
    pub fn monthly_equivalent(&self) -> f64 {
        self.frequency.monthly_equivalent(self.amount)
    }
}
