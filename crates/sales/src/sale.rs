use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caisse_core::{Entity, Money, ProductId, SaleId, ValueObject};

use crate::cart::{CartLine, Totals};

/// How the customer paid (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::Cash];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Label printed on receipts and shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Carte",
            PaymentMethod::Cash => "Espèces",
        }
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = caisse_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(caisse_core::DomainError::validation(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

/// Immutable copy of a cart line taken when the sale completes.
///
/// Only the fields needed to reproduce the receipt are kept, so later edits
/// or deletions in the catalog never alter sales history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl SaleLine {
    pub fn snapshot(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id().clone(),
            name: line.product().name().to_string(),
            price: line.product().price(),
            quantity: line.quantity(),
        }
    }

    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

impl ValueObject for SaleLine {}

/// Historical record of one completed transaction. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    #[serde(rename = "date")]
    recorded_at: DateTime<Utc>,
    items: Vec<SaleLine>,
    subtotal: Money,
    tax: Money,
    total: Money,
    payment_method: PaymentMethod,
}

impl Sale {
    pub fn new(
        id: SaleId,
        recorded_at: DateTime<Utc>,
        items: Vec<SaleLine>,
        totals: Totals,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id,
            recorded_at,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            payment_method,
        }
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn items(&self) -> &[SaleLine] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
