use serde::{Deserialize, Serialize};

use caisse_catalog::Product;
use caisse_core::{DomainError, DomainResult, Entity, Money, ProductId, TaxRate};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 9_999;

/// Cart line: a product plus a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity, unrounded.
    pub fn line_total(&self) -> Money {
        self.product.price() * self.quantity
    }

    fn bump(&mut self) -> DomainResult<()> {
        if self.quantity >= MAX_LINE_QUANTITY {
            return Err(DomainError::validation(format!(
                "cart quantity cannot exceed {MAX_LINE_QUANTITY}"
            )));
        }
        self.quantity += 1;
        Ok(())
    }
}

/// Derived cart amounts. Never rounded; round at display time only.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    /// Single pass over `(unit price, quantity)` pairs.
    pub fn compute<I>(lines: I, rate: TaxRate) -> Self
    where
        I: IntoIterator<Item = (Money, u32)>,
    {
        let subtotal: Money = lines.into_iter().map(|(price, qty)| price * qty).sum();
        let tax = rate.apply(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Transient selection of products for one pending transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == id)
    }

    /// Add one unit of `product`: bump the existing line or append a new one.
    ///
    /// Only fails when the line is already at [`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, product: &Product) -> DomainResult<()> {
        match self.lines.iter_mut().find(|l| l.product_id() == product.id()) {
            Some(line) => line.bump(),
            None => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
                Ok(())
            }
        }
    }

    /// Replace the quantity of a line.
    ///
    /// Quantities outside `1..=MAX_LINE_QUANTITY` are rejected and the line is
    /// left unchanged; removing a line is the separate [`Cart::remove`] action.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> DomainResult<()> {
        if quantity < 1 {
            return Err(DomainError::validation("cart quantity must be at least 1"));
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(DomainError::validation(format!(
                "cart quantity cannot exceed {MAX_LINE_QUANTITY}"
            )));
        }
        let line = self.line_mut(id)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn increment(&mut self, id: &ProductId) -> DomainResult<()> {
        self.line_mut(id)?.bump()
    }

    /// Decrease a line by one unit, floored at 1.
    pub fn decrement(&mut self, id: &ProductId) -> DomainResult<()> {
        let line = self.line_mut(id)?;
        if line.quantity <= 1 {
            return Err(DomainError::validation("cart quantity cannot go below 1"));
        }
        line.quantity -= 1;
        Ok(())
    }

    /// Drop the line for `id`; no-op when absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|l| l.product_id() != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Subtotal, tax at the standard rate, and total.
    pub fn compute_totals(&self) -> Totals {
        self.compute_totals_at(TaxRate::STANDARD)
    }

    pub fn compute_totals_at(&self, rate: TaxRate) -> Totals {
        Totals::compute(self.lines.iter().map(|l| (l.product.price(), l.quantity)), rate)
    }

    fn line_mut(&mut self, id: &ProductId) -> DomainResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id() == id)
            .ok_or_else(|| DomainError::not_found(format!("cart line {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caisse_catalog::samples;

    fn product(id: &str) -> Product {
        samples::products()
            .into_iter()
            .find(|p| p.id().as_str() == id)
            .unwrap()
    }

    fn approx(a: Money, b: f64) -> bool {
        (a.amount() - b).abs() < 1e-9
    }

    #[test]
    fn add_appends_then_increments() {
        let mut cart = Cart::new();
        let cafe = product("prod-1");

        cart.add(&cafe).unwrap();
        cart.add(&cafe).unwrap();
        cart.add(&product("prod-6")).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(cafe.id()).unwrap().quantity(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn cafe_and_croissant_totals() {
        let mut cart = Cart::new();
        let cafe = product("prod-1");
        cart.add(&cafe).unwrap();
        cart.add(&cafe).unwrap();
        cart.add(&product("prod-6")).unwrap();

        let totals = cart.compute_totals();
        assert!(approx(totals.subtotal, 4.20));
        assert!(approx(totals.tax, 0.84));
        assert!(approx(totals.total, 5.04));
        assert_eq!(totals.total, totals.subtotal + totals.tax);
        assert_eq!(totals.total.display(), "5.04 €");
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        assert_eq!(Cart::new().compute_totals(), Totals::default());
    }

    #[test]
    fn set_quantity_rejects_zero_and_keeps_line() {
        let mut cart = Cart::new();
        let tea = product("prod-2");
        cart.add(&tea).unwrap();
        cart.set_quantity(tea.id(), 4).unwrap();

        let err = cart.set_quantity(tea.id(), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(cart.line(tea.id()).unwrap().quantity(), 4);
    }

    #[test]
    fn set_quantity_unknown_line_is_not_found() {
        let mut cart = Cart::new();
        let err = cart.set_quantity(&ProductId::new("prod-1"), 2).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn decrement_floors_at_one() {
        let mut cart = Cart::new();
        let pizza = product("prod-8");
        cart.add(&pizza).unwrap();
        cart.increment(pizza.id()).unwrap();

        cart.decrement(pizza.id()).unwrap();
        assert_eq!(cart.line(pizza.id()).unwrap().quantity(), 1);

        assert!(cart.decrement(pizza.id()).is_err());
        assert_eq!(cart.line(pizza.id()).unwrap().quantity(), 1);
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut cart = Cart::new();
        cart.add(&product("prod-3")).unwrap();
        cart.remove(&ProductId::new("prod-99"));
        assert_eq!(cart.lines().len(), 1);
        cart.remove(&ProductId::new("prod-3"));
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&product("prod-4")).unwrap();
        cart.clear();
        let once = cart.clone();
        cart.clear();
        assert_eq!(cart, once);
        assert!(cart.is_empty());
    }

    #[test]
    fn cart_line_serializes_flat_with_quantity() {
        let mut cart = Cart::new();
        cart.add(&product("prod-6")).unwrap();
        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["id"], "prod-6");
        assert_eq!(json["categoryId"], "cat-4");
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn line_quantity_is_capped() {
        let mut cart = Cart::new();
        let cafe = product("prod-1");
        cart.add(&cafe).unwrap();

        let err = cart.set_quantity(cafe.id(), u32::MAX).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        cart.set_quantity(cafe.id(), MAX_LINE_QUANTITY).unwrap();
        assert!(matches!(cart.add(&cafe).unwrap_err(), DomainError::Validation(_)));
        assert!(matches!(cart.increment(cafe.id()).unwrap_err(), DomainError::Validation(_)));
        assert_eq!(cart.line(cafe.id()).unwrap().quantity(), MAX_LINE_QUANTITY);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: total is exactly subtotal + tax, and tax is exactly
            /// subtotal × rate (no intermediate rounding).
            #[test]
            fn totals_invariant_holds(
                lines in proptest::collection::vec((0u32..10_000, 1u32..50), 0..20)
            ) {
                let priced: Vec<(Money, u32)> = lines
                    .iter()
                    .map(|(cents, qty)| (Money::new(f64::from(*cents) / 100.0), *qty))
                    .collect();

                let totals = Totals::compute(priced.clone(), TaxRate::STANDARD);
                let expected_subtotal: Money = priced.iter().map(|(p, q)| *p * *q).sum();

                prop_assert_eq!(totals.subtotal, expected_subtotal);
                prop_assert_eq!(totals.tax, TaxRate::STANDARD.apply(totals.subtotal));
                prop_assert_eq!(totals.total, totals.subtotal + totals.tax);
            }

            /// Property: no sequence of decrements drops a line below 1.
            #[test]
            fn decrement_never_goes_below_one(adds in 1usize..10, decs in 0usize..20) {
                let mut cart = Cart::new();
                let cafe = product("prod-1");
                for _ in 0..adds {
                    cart.add(&cafe).unwrap();
                }
                for _ in 0..decs {
                    let _ = cart.decrement(cafe.id());
                }
                let qty = cart.line(cafe.id()).unwrap().quantity();
                prop_assert!(qty >= 1);
                prop_assert_eq!(qty as usize, adds.saturating_sub(decs).max(1));
            }
        }
    }
}
