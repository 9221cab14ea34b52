use std::fmt;

use serde::{Deserialize, Serialize};

/// Enumerates the canonical recurrence cadences the engine understands.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Biannually,
    Yearly,
}

impl Frequency {
    /// Maps a free-text frequency label onto a canonical code. Case and
    /// surrounding whitespace are ignored; anything unrecognized degrades to
    /// `Monthly` so malformed sheet data keeps rendering.
    pub fn normalize(raw: &str) -> Frequency {
        match raw.trim().to_lowercase().as_str() {
            "yearly" | "annual" | "annually" => Frequency::Yearly,
            "quarterly" | "quarter" => Frequency::Quarterly,
            "biannually" | "semi-annually" | "half-yearly" => Frequency::Biannually,
            "weekly" => Frequency::Weekly,
            "biweekly" | "bi-weekly" | "fortnightly" => Frequency::Biweekly,
            "daily" => Frequency::Daily,
            _ => Frequency::Monthly,
        }
    }

    /// Months between consecutive charges, for the month-granular cadences.
    pub fn months_per_cycle(self) -> Option<u32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Biannually => Some(6),
            Frequency::Yearly => Some(12),
            Frequency::Daily | Frequency::Weekly | Frequency::Biweekly => None,
        }
    }

    /// Cadences that charge at least once in every active month.
    pub fn is_sub_monthly(self) -> bool {
        matches!(
            self,
            Frequency::Daily | Frequency::Weekly | Frequency::Biweekly
        )
    }

    /// Converts a per-charge amount into its monthly-equivalent cost for
    /// display. The sub-monthly factors are calendar averages.
    pub fn monthly_equivalent(self, amount: f64) -> f64 {
        match self {
            Frequency::Yearly => amount / 12.0,
            Frequency::Quarterly => amount / 3.0,
            Frequency::Biannually => amount / 6.0,
            Frequency::Weekly => amount * 4.33,
            Frequency::Biweekly => amount * 2.17,
            Frequency::Daily => amount * 30.42,
            Frequency::Monthly => amount,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Biannually => "Biannually",
            Frequency::Yearly => "Yearly",
        }
    }

    /// Human-readable cadence description with formatted amounts, e.g.
    /// `"€4.33 per year (€0.36/mo)"`.
    pub fn describe(self, formatted_amount: &str, formatted_monthly: &str) -> String {
        match self {
            Frequency::Yearly => format!("{formatted_amount} per year ({formatted_monthly}/mo)"),
            Frequency::Quarterly => {
                format!("{formatted_amount} every 3 months ({formatted_monthly}/mo)")
            }
            Frequency::Biannually => {
                format!("{formatted_amount} every 6 months ({formatted_monthly}/mo)")
            }
            Frequency::Weekly => format!("{formatted_amount} weekly ({formatted_monthly}/mo)"),
            Frequency::Biweekly => {
                format!("{formatted_amount} every 2 weeks ({formatted_monthly}/mo)")
            }
            Frequency::Daily => format!("{formatted_amount} daily ({formatted_monthly}/mo)"),
            Frequency::Monthly => format!("{formatted_amount} monthly"),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
