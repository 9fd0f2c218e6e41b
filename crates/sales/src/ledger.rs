use chrono::{DateTime, Utc};

use caisse_core::{Entity, SaleId};

use crate::cart::{CartLine, Totals};
use crate::sale::{PaymentMethod, Sale, SaleLine};

/// Append-only history of completed sales, newest first.
///
/// There is no pruning or archival: the ledger grows with every sale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    sales: Vec<Sale>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a persisted list (expected newest first).
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        Self { sales }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn get(&self, id: &SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id() == id)
    }

    /// Snapshot the cart lines into a new sale and prepend it.
    ///
    /// Totals are taken as given; the caller computes them from the same lines.
    pub fn record_sale(
        &mut self,
        lines: &[CartLine],
        totals: Totals,
        payment_method: PaymentMethod,
        at: DateTime<Utc>,
    ) -> &Sale {
        let items = lines.iter().map(SaleLine::snapshot).collect();
        let sale = Sale::new(SaleId::generate(), at, items, totals, payment_method);
        self.sales.insert(0, sale);
        &self.sales[0]
    }
}
