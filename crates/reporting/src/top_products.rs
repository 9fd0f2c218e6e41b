use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use caisse_catalog::Catalog;
use caisse_core::ProductId;
use caisse_sales::Sale;

/// Length of the dashboard best-seller list.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Display name for products sold in the past but since deleted.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Units sold for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
}

/// Best sellers by units sold, descending.
///
/// Ties keep the order in which products first appear in the ledger (newest
/// sale first). Names come from the current catalog; deleted products are
/// reported as [`UNKNOWN_PRODUCT`] so historical sales still render.
pub fn top_products(sales: &[Sale], catalog: &Catalog, limit: usize) -> Vec<TopProduct> {
    let mut order: Vec<(ProductId, u64)> = Vec::new();
    let mut index: HashMap<ProductId, usize> = HashMap::new();

    for line in sales.iter().flat_map(Sale::items) {
        match index.get(&line.product_id) {
            Some(&i) => order[i].1 += u64::from(line.quantity),
            None => {
                index.insert(line.product_id.clone(), order.len());
                order.push((line.product_id.clone(), u64::from(line.quantity)));
            }
        }
    }

    // Stable sort: equal quantities keep first-appearance order.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .take(limit)
        .map(|(product_id, quantity)| {
            let name = catalog
                .product(&product_id)
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
            TopProduct {
                product_id,
                name,
                quantity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use caisse_catalog::samples as catalog_samples;
    use caisse_sales::{Cart, Ledger, PaymentMethod, samples};
    use chrono::Utc;

    fn catalog() -> Catalog {
        Catalog::new(catalog_samples::products(), catalog_samples::categories())
    }

    #[test]
    fn sample_ledger_ranks_cafe_first() {
        let sales = samples::sales(Utc::now());
        let top = top_products(&sales, &catalog(), DEFAULT_TOP_LIMIT);

        let ranked: Vec<(&str, u64)> = top.iter().map(|t| (t.name.as_str(), t.quantity)).collect();
        assert_eq!(
            ranked,
            vec![
                ("Café", 5),
                ("Crêpe", 2),
                ("Croissant", 1),
                ("Sandwich", 1),
                ("Eau minérale", 1),
            ]
        );
    }

    #[test]
    fn limit_truncates() {
        let sales = samples::sales(Utc::now());
        assert_eq!(top_products(&sales, &catalog(), 2).len(), 2);
        assert!(top_products(&sales, &catalog(), 0).is_empty());
        assert_eq!(top_products(&sales, &catalog(), 50).len(), 8);
    }

    #[test]
    fn deleted_product_gets_placeholder_name() {
        let mut catalog = catalog();
        let pizza_id = ProductId::new("prod-8");

        let mut cart = Cart::new();
        cart.add(catalog.product(&pizza_id).unwrap()).unwrap();
        cart.set_quantity(&pizza_id, 9).unwrap();
        let mut ledger = Ledger::new();
        ledger.record_sale(cart.lines(), cart.compute_totals(), PaymentMethod::Card, Utc::now());

        catalog.remove_product(&pizza_id);

        let top = top_products(ledger.sales(), &catalog, DEFAULT_TOP_LIMIT);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, UNKNOWN_PRODUCT);
        assert_eq!(top[0].quantity, 9);
        assert_eq!(top[0].product_id, pizza_id);
    }

    #[test]
    fn renamed_product_shows_current_name() {
        let mut catalog = catalog();
        let tea_id = ProductId::new("prod-2");
        let renamed = caisse_catalog::Product::with_id(
            tea_id.clone(),
            caisse_catalog::ProductDraft::new("Thé glacé", 2.50, "cat-1"),
        )
        .unwrap();
        catalog.update_product(renamed).unwrap();

        let sales = samples::sales(Utc::now());
        let top = top_products(&sales, &catalog, 50);
        assert!(top.iter().any(|t| t.product_id == tea_id && t.name == "Thé glacé"));
    }
}
