//! Dashboard snapshot: every metric the sales dashboard shows, in one pass
//! of calls over the ledger.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use caisse_catalog::Catalog;
use caisse_core::Money;
use caisse_sales::Sale;

use crate::daily::{DEFAULT_DAYS, DailyRevenue, daily_revenue_series};
use crate::metrics::{PaymentBreakdown, average_sale, payment_method_breakdown, sales_count, total_revenue};
use crate::top_products::{DEFAULT_TOP_LIMIT, TopProduct, top_products};

/// Computed dashboard figures (serializable for the presentation layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_revenue: Money,
    pub sales_count: usize,
    pub average_sale: Money,
    pub daily_revenue: Vec<DailyRevenue>,
    pub payment_methods: PaymentBreakdown,
    pub top_products: Vec<TopProduct>,
}

/// Read-only dashboard over a ledger and catalog.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    sales: &'a [Sale],
    catalog: &'a Catalog,
    days: u32,
    top_limit: usize,
}

impl<'a> Dashboard<'a> {
    pub fn new(sales: &'a [Sale], catalog: &'a Catalog) -> Self {
        Self {
            sales,
            catalog,
            days: DEFAULT_DAYS,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_top_limit(mut self, top_limit: usize) -> Self {
        self.top_limit = top_limit;
        self
    }

    /// Snapshot with calendar days taken in `tz`, ending at `today`.
    pub fn snapshot_at<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> DashboardSnapshot {
        DashboardSnapshot {
            total_revenue: total_revenue(self.sales),
            sales_count: sales_count(self.sales),
            average_sale: average_sale(self.sales),
            daily_revenue: daily_revenue_series(self.sales, self.days, today, tz),
            payment_methods: payment_method_breakdown(self.sales),
            top_products: top_products(self.sales, self.catalog, self.top_limit),
        }
    }

    /// Snapshot in the machine's local time zone, ending today.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot_at(Local::now().date_naive(), &Local)
    }
}
