//! The POS controller: single owner of catalog, cart and ledger.
//!
//! Every mutation that must survive a restart is applied to a copy first,
//! persisted, and only then swapped in. A failed write therefore leaves the
//! in-memory state exactly as it was before the call.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use caisse_catalog::{Catalog, Category, Product, ProductDraft, ProductFilter, samples as catalog_samples};
use caisse_core::{DomainError, Entity, ProductId, SaleId};
use caisse_reporting::{Dashboard, DashboardSnapshot};
use caisse_sales::{Cart, Ledger, PaymentMethod, Sale, Totals, samples as sale_samples};
use caisse_storage::snapshot::save_collection;
use caisse_storage::{CATEGORIES_KEY, KeyValueStore, PRODUCTS_KEY, PosSnapshot, SALES_KEY};

use crate::config::{AppConfig, DEFAULT_SHOP_NAME};
use crate::error::{AppResult, CheckoutError};
use crate::printer::Printer;
use crate::receipt::Receipt;

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSale {
    pub sale: Sale,
    pub receipt: Receipt,
    /// False when the printer failed; the sale is recorded regardless.
    pub printed: bool,
}

pub struct PosState {
    catalog: Catalog,
    cart: Cart,
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
    printer: Box<dyn Printer>,
    shop_name: String,
}

impl std::fmt::Debug for PosState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosState")
            .field("products", &self.catalog.products().len())
            .field("categories", &self.catalog.categories().len())
            .field("cart_lines", &self.cart.lines().len())
            .field("sales", &self.ledger.len())
            .field("shop_name", &self.shop_name)
            .finish()
    }
}

impl PosState {
    /// Load persisted collections from `store`.
    ///
    /// Collections never stored before are filled with the sample fixtures
    /// (or left empty when seeding is off) and written back immediately.
    /// Corrupt collections fail the whole load.
    pub fn open<S, P>(store: S, printer: P, config: &AppConfig) -> AppResult<Self>
    where
        S: KeyValueStore + 'static,
        P: Printer + 'static,
    {
        let loaded = PosSnapshot::load(&store)?;
        let incomplete =
            loaded.products.is_none() || loaded.categories.is_none() || loaded.sales.is_none();

        let defaults = if config.seed_samples {
            PosSnapshot {
                products: catalog_samples::products(),
                categories: catalog_samples::categories(),
                sales: sale_samples::sales(Utc::now()),
            }
        } else {
            PosSnapshot::default()
        };
        let snapshot = loaded.or_defaults(defaults);

        if incomplete {
            tracing::info!(seeded = config.seed_samples, "initializing missing collections");
            snapshot.save(&store)?;
        }

        tracing::info!(
            products = snapshot.products.len(),
            categories = snapshot.categories.len(),
            sales = snapshot.sales.len(),
            "pos state ready"
        );

        Ok(Self {
            catalog: Catalog::new(snapshot.products, snapshot.categories),
            cart: Cart::new(),
            ledger: Ledger::from_sales(snapshot.sales),
            store: Box::new(store),
            printer: Box::new(printer),
            shop_name: config.shop_name.clone(),
        })
    }

    pub fn shop_name(&self) -> &str {
        if self.shop_name.is_empty() {
            DEFAULT_SHOP_NAME
        } else {
            &self.shop_name
        }
    }

    // ---- catalog ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    pub fn filter_products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.catalog.filter(filter).cloned().collect()
    }

    pub fn create_product(&mut self, draft: ProductDraft) -> AppResult<Product> {
        let product = Product::create(draft)?;
        let mut catalog = self.catalog.clone();
        catalog.add_product(product.clone())?;
        self.commit_products(catalog)?;

        tracing::info!(product_id = %product.id(), name = product.name(), "product created");
        Ok(product)
    }

    pub fn update_product(&mut self, id: &ProductId, draft: ProductDraft) -> AppResult<Product> {
        let product = Product::with_id(id.clone(), draft)?;
        let mut catalog = self.catalog.clone();
        catalog.update_product(product.clone())?;
        self.commit_products(catalog)?;

        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Remove a product. Sales already recorded keep their snapshot, and the
    /// cart is left alone: a line already added can still be sold.
    pub fn delete_product(&mut self, id: &ProductId) -> AppResult<Product> {
        let mut catalog = self.catalog.clone();
        let removed = catalog
            .remove_product(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))?;
        self.commit_products(catalog)?;

        tracing::info!(product_id = %id, "product deleted");
        Ok(removed)
    }

    pub fn add_category(&mut self, category: Category) -> AppResult<()> {
        let mut catalog = self.catalog.clone();
        let id = category.id().clone();
        catalog.add_category(category)?;
        self.commit_categories(catalog)?;

        tracing::info!(category_id = %id, "category added");
        Ok(())
    }

    fn commit_products(&mut self, catalog: Catalog) -> AppResult<()> {
        save_collection(&self.store, PRODUCTS_KEY, catalog.products())?;
        self.catalog = catalog;
        Ok(())
    }

    fn commit_categories(&mut self, catalog: Catalog) -> AppResult<()> {
        save_collection(&self.store, CATEGORIES_KEY, catalog.categories())?;
        self.catalog = catalog;
        Ok(())
    }

    // ---- cart ----

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_totals(&self) -> Totals {
        self.cart.compute_totals()
    }

    /// Add one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, id: &ProductId) -> AppResult<()> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))?;
        self.cart.add(product)?;
        tracing::debug!(product_id = %id, items = self.cart.item_count(), "added to cart");
        Ok(())
    }

    pub fn set_cart_quantity(&mut self, id: &ProductId, quantity: u32) -> AppResult<()> {
        self.cart.set_quantity(id, quantity)?;
        Ok(())
    }

    pub fn increment(&mut self, id: &ProductId) -> AppResult<()> {
        self.cart.increment(id)?;
        Ok(())
    }

    pub fn decrement(&mut self, id: &ProductId) -> AppResult<()> {
        self.cart.decrement(id)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.cart.remove(id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // ---- checkout ----

    pub fn checkout(&mut self, payment_method: Option<PaymentMethod>) -> AppResult<CompletedSale> {
        self.checkout_at(payment_method, Utc::now())
    }

    /// Record the cart as a sale stamped `at`, print it, then empty the cart.
    ///
    /// Guards run before anything changes. The ledger is persisted before the
    /// receipt is printed; a printer failure is logged and reported through
    /// [`CompletedSale::printed`] but never undoes the sale.
    pub fn checkout_at(
        &mut self,
        payment_method: Option<PaymentMethod>,
        at: DateTime<Utc>,
    ) -> AppResult<CompletedSale> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        let payment_method = payment_method.ok_or(CheckoutError::MissingPaymentMethod)?;

        let totals = self.cart.compute_totals();
        if !(totals.subtotal.is_finite() && totals.tax.is_finite() && totals.total.is_finite()) {
            return Err(DomainError::validation("cart total is out of range").into());
        }

        let mut ledger = self.ledger.clone();
        let sale = ledger
            .record_sale(self.cart.lines(), totals, payment_method, at)
            .clone();
        save_collection(&self.store, SALES_KEY, ledger.sales())?;
        self.ledger = ledger;

        tracing::info!(
            sale_id = %sale.id(),
            total = %sale.total().display(),
            payment_method = payment_method.as_str(),
            "sale recorded"
        );

        let receipt = Receipt::from_sale(&sale, self.shop_name());
        let printed = match self.printer.print(&receipt) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(sale_id = %sale.id(), error = %err, "receipt was not printed");
                false
            }
        };

        self.cart.clear();
        Ok(CompletedSale {
            sale,
            receipt,
            printed,
        })
    }

    // ---- ledger ----

    /// Recorded sales, newest first.
    pub fn sales(&self) -> &[Sale] {
        self.ledger.sales()
    }

    pub fn receipt_for(&self, id: &SaleId) -> AppResult<Receipt> {
        let sale = self
            .ledger
            .get(id)
            .ok_or_else(|| DomainError::not_found(format!("sale {id}")))?;
        Ok(Receipt::from_sale(sale, self.shop_name()))
    }

    /// Print the receipt of an earlier sale again.
    pub fn reprint(&self, id: &SaleId) -> AppResult<Receipt> {
        let receipt = self.receipt_for(id)?;
        self.printer.print(&receipt)?;
        tracing::info!(sale_id = %id, "receipt reprinted");
        Ok(receipt)
    }

    // ---- dashboard ----

    pub fn dashboard(&self) -> DashboardSnapshot {
        Dashboard::new(self.ledger.sales(), &self.catalog).snapshot()
    }

    pub fn dashboard_at<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> DashboardSnapshot {
        Dashboard::new(self.ledger.sales(), &self.catalog).snapshot_at(today, tz)
    }
}
