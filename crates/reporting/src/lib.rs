//! Dashboard aggregation over the sale ledger.
//!
//! Every function here is a pure, read-only projection recomputed on each
//! call from the ledger (and the catalog, for display names). Nothing is
//! cached, so there is nothing to invalidate when a sale is recorded.

pub mod daily;
pub mod dashboard;
pub mod metrics;
pub mod top_products;

pub use daily::{DailyRevenue, DEFAULT_DAYS, daily_revenue_series};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use metrics::{PaymentBreakdown, average_sale, payment_method_breakdown, sales_count, total_revenue};
pub use top_products::{DEFAULT_TOP_LIMIT, TopProduct, UNKNOWN_PRODUCT, top_products};
