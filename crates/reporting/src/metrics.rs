use serde::{Deserialize, Serialize};

use caisse_core::Money;
use caisse_sales::{PaymentMethod, Sale};

/// Sum of every sale total.
pub fn total_revenue(sales: &[Sale]) -> Money {
    sales.iter().map(Sale::total).sum()
}

pub fn sales_count(sales: &[Sale]) -> usize {
    sales.len()
}

/// Mean sale total; zero for an empty ledger.
pub fn average_sale(sales: &[Sale]) -> Money {
    total_revenue(sales).average_over(sales_count(sales))
}

/// Number of sales per payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub card: usize,
    pub cash: usize,
}

impl PaymentBreakdown {
    pub fn count(&self, method: PaymentMethod) -> usize {
        match method {
            PaymentMethod::Card => self.card,
            PaymentMethod::Cash => self.cash,
        }
    }

    /// `(method, count)` for every method, card first.
    pub fn entries(&self) -> [(PaymentMethod, usize); 2] {
        PaymentMethod::ALL.map(|m| (m, self.count(m)))
    }

    /// Share of `method` in `[0, 1]`; zero when no sale was recorded.
    pub fn share(&self, method: PaymentMethod) -> f64 {
        let total = self.card + self.cash;
        if total == 0 {
            0.0
        } else {
            self.count(method) as f64 / total as f64
        }
    }
}

pub fn payment_method_breakdown(sales: &[Sale]) -> PaymentBreakdown {
    sales
        .iter()
        .fold(PaymentBreakdown::default(), |mut acc, sale| {
            match sale.payment_method() {
                PaymentMethod::Card => acc.card += 1,
                PaymentMethod::Cash => acc.cash += 1,
            }
            acc
        })
}
