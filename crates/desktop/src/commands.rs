//! Tauri commands for frontend integration.

use std::sync::Mutex;

use serde::Serialize;
use tauri::State;

use caisse_catalog::{Category, Product, ProductDraft, ProductFilter};
use caisse_core::{ProductId, SaleId};
use caisse_reporting::DashboardSnapshot;
use caisse_sales::{Cart, PaymentMethod, Sale, Totals};

use crate::error::AppResult;
use crate::state::{CompletedSale, PosState};

/// Application state shared across Tauri commands.
pub struct AppState {
    pos: Mutex<PosState>,
}

impl AppState {
    pub fn new(pos: PosState) -> Self {
        Self {
            pos: Mutex::new(pos),
        }
    }

    fn with_pos<T>(&self, f: impl FnOnce(&mut PosState) -> AppResult<T>) -> Result<T, String> {
        let mut pos = self
            .pos
            .lock()
            .map_err(|_| "pos state lock poisoned".to_string())?;
        f(&mut pos).map_err(|e| {
            tracing::warn!(error = %e, "command failed");
            e.to_string()
        })
    }
}

/// Cart as the frontend renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart: Cart,
    pub totals: Totals,
    pub item_count: u32,
}

impl CartView {
    fn of(pos: &PosState) -> Self {
        Self {
            cart: pos.cart().clone(),
            totals: pos.cart_totals(),
            item_count: pos.cart().item_count(),
        }
    }
}

#[tauri::command]
pub fn list_products(
    search: Option<String>,
    category_id: Option<String>,
    state: State<'_, AppState>,
) -> Result<Vec<Product>, String> {
    let filter = ProductFilter::from_params(search, category_id);
    state.with_pos(|pos| Ok(pos.filter_products(&filter)))
}

#[tauri::command]
pub fn list_categories(state: State<'_, AppState>) -> Result<Vec<Category>, String> {
    state.with_pos(|pos| Ok(pos.categories().to_vec()))
}

#[tauri::command]
pub fn create_product(draft: ProductDraft, state: State<'_, AppState>) -> Result<Product, String> {
    state.with_pos(|pos| pos.create_product(draft))
}

#[tauri::command]
pub fn update_product(
    id: String,
    draft: ProductDraft,
    state: State<'_, AppState>,
) -> Result<Product, String> {
    let id = parse_product_id(&id)?;
    state.with_pos(|pos| pos.update_product(&id, draft))
}

#[tauri::command]
pub fn delete_product(id: String, state: State<'_, AppState>) -> Result<Product, String> {
    let id = parse_product_id(&id)?;
    state.with_pos(|pos| pos.delete_product(&id))
}

#[tauri::command]
pub fn add_category(category: Category, state: State<'_, AppState>) -> Result<(), String> {
    state.with_pos(|pos| pos.add_category(category))
}

#[tauri::command]
pub fn get_cart(state: State<'_, AppState>) -> Result<CartView, String> {
    state.with_pos(|pos| Ok(CartView::of(pos)))
}

#[tauri::command]
pub fn add_to_cart(product_id: String, state: State<'_, AppState>) -> Result<CartView, String> {
    let id = parse_product_id(&product_id)?;
    state.with_pos(|pos| {
        pos.add_to_cart(&id)?;
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn set_cart_quantity(
    product_id: String,
    quantity: u32,
    state: State<'_, AppState>,
) -> Result<CartView, String> {
    let id = parse_product_id(&product_id)?;
    state.with_pos(|pos| {
        pos.set_cart_quantity(&id, quantity)?;
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn increment_cart_item(product_id: String, state: State<'_, AppState>) -> Result<CartView, String> {
    let id = parse_product_id(&product_id)?;
    state.with_pos(|pos| {
        pos.increment(&id)?;
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn decrement_cart_item(product_id: String, state: State<'_, AppState>) -> Result<CartView, String> {
    let id = parse_product_id(&product_id)?;
    state.with_pos(|pos| {
        pos.decrement(&id)?;
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn remove_from_cart(product_id: String, state: State<'_, AppState>) -> Result<CartView, String> {
    let id = parse_product_id(&product_id)?;
    state.with_pos(|pos| {
        pos.remove_from_cart(&id);
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn clear_cart(state: State<'_, AppState>) -> Result<CartView, String> {
    state.with_pos(|pos| {
        pos.clear_cart();
        Ok(CartView::of(pos))
    })
}

#[tauri::command]
pub fn checkout(
    payment_method: Option<String>,
    state: State<'_, AppState>,
) -> Result<CompletedSale, String> {
    let method = payment_method
        .map(|m| m.parse::<PaymentMethod>())
        .transpose()
        .map_err(|e| format!("Invalid payment_method: {e}"))?;
    state.with_pos(|pos| pos.checkout(method))
}

/// HTML print document for a recorded sale; the webview sends it to the printer.
#[tauri::command]
pub fn receipt_html(sale_id: String, state: State<'_, AppState>) -> Result<String, String> {
    let id = parse_sale_id(&sale_id)?;
    state.with_pos(|pos| Ok(pos.receipt_for(&id)?.to_html()))
}

#[tauri::command]
pub fn list_sales(state: State<'_, AppState>) -> Result<Vec<Sale>, String> {
    state.with_pos(|pos| Ok(pos.sales().to_vec()))
}

#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    state.with_pos(|pos| Ok(pos.dashboard()))
}

fn parse_product_id(raw: &str) -> Result<ProductId, String> {
    raw.parse::<ProductId>()
        .map_err(|e| format!("Invalid product id: {e}"))
}

fn parse_sale_id(raw: &str) -> Result<SaleId, String> {
    raw.parse::<SaleId>().map_err(|e| format!("Invalid sale id: {e}"))
}
