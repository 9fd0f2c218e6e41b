use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use caisse_core::Money;
use caisse_sales::Sale;

/// Length of the dashboard revenue chart.
pub const DEFAULT_DAYS: u32 = 7;

/// Revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Short French weekday, e.g. `lun.`.
    pub label: String,
    pub total: Money,
}

/// Revenue per calendar day for the last `days` days, oldest first.
///
/// `today` is included. Sales are bucketed by their calendar date in `tz`,
/// so a sale at 23:30 local time lands on that local day even when its UTC
/// date is the next one. Sales outside the window are ignored.
pub fn daily_revenue_series<Tz: TimeZone>(
    sales: &[Sale],
    days: u32,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DailyRevenue> {
    if days == 0 {
        return Vec::new();
    }
    let Some(first) = today.checked_sub_days(Days::new(u64::from(days - 1))) else {
        return Vec::new();
    };

    let mut buckets: HashMap<NaiveDate, Money> = HashMap::new();
    for sale in sales {
        let date = sale.recorded_at().with_timezone(tz).date_naive();
        if date >= first && date <= today {
            *buckets.entry(date).or_default() += sale.total();
        }
    }

    first
        .iter_days()
        .take(days as usize)
        .map(|date| DailyRevenue {
            date,
            label: weekday_label(date.weekday()).to_string(),
            total: buckets.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lun.",
        Weekday::Tue => "mar.",
        Weekday::Wed => "mer.",
        Weekday::Thu => "jeu.",
        Weekday::Fri => "ven.",
        Weekday::Sat => "sam.",
        Weekday::Sun => "dim.",
    }
}
