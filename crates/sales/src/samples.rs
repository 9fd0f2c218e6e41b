//! Sample ledger: five sales spread over the last five days.

use chrono::{DateTime, Duration, Utc};

use caisse_core::{Money, SaleId};

use crate::cart::Totals;
use crate::sale::{PaymentMethod, Sale, SaleLine};

/// Sample sales relative to `now`, newest first (`sale-1` is today).
pub fn sales(now: DateTime<Utc>) -> Vec<Sale> {
    vec![
        sample(
            "sale-1",
            now,
            &[("prod-1", "Café", 1.50, 2), ("prod-6", "Croissant", 1.20, 1)],
            (4.20, 0.84, 5.04),
            PaymentMethod::Card,
        ),
        sample(
            "sale-2",
            now - Duration::days(1),
            &[("prod-3", "Sandwich", 3.50, 1), ("prod-7", "Eau minérale", 1.00, 1)],
            (4.50, 0.90, 5.40),
            PaymentMethod::Cash,
        ),
        sample(
            "sale-3",
            now - Duration::days(2),
            &[("prod-8", "Pizza", 8.00, 1)],
            (8.00, 1.60, 9.60),
            PaymentMethod::Card,
        ),
        sample(
            "sale-4",
            now - Duration::days(3),
            &[("prod-1", "Café", 1.50, 3), ("prod-5", "Crêpe", 3.00, 2)],
            (10.50, 2.10, 12.60),
            PaymentMethod::Card,
        ),
        sample(
            "sale-5",
            now - Duration::days(4),
            &[("prod-4", "Salade", 4.50, 1), ("prod-2", "Thé", 2.00, 1)],
            (6.50, 1.30, 7.80),
            PaymentMethod::Cash,
        ),
    ]
}

fn sample(
    id: &str,
    at: DateTime<Utc>,
    items: &[(&str, &str, f64, u32)],
    (subtotal, tax, total): (f64, f64, f64),
    payment_method: PaymentMethod,
) -> Sale {
    let items = items
        .iter()
        .map(|&(product_id, name, price, quantity)| SaleLine {
            product_id: product_id.into(),
            name: name.to_string(),
            price: Money::new(price),
            quantity,
        })
        .collect();
    let totals = Totals {
        subtotal: Money::new(subtotal),
        tax: Money::new(tax),
        total: Money::new(total),
    };
    Sale::new(SaleId::new(id), at, items, totals, payment_method)
}
