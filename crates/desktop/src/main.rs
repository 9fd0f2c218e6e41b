//! Tauri application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri")]
use caisse_desktop::commands::*;

#[cfg(feature = "tauri")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    caisse_observability::init();

    let config = caisse_desktop::AppConfig::from_env();
    tracing::info!(shop = %config.shop_name, "starting Auto-Caisse desktop");

    let pos = caisse_desktop::bootstrap(&config)?;

    tauri::Builder::default()
        .manage(AppState::new(pos))
        .invoke_handler(tauri::generate_handler![
            list_products,
            list_categories,
            create_product,
            update_product,
            delete_product,
            add_category,
            get_cart,
            add_to_cart,
            set_cart_quantity,
            increment_cart_item,
            decrement_cart_item,
            remove_from_cart,
            clear_cart,
            checkout,
            receipt_html,
            list_sales,
            get_dashboard,
        ])
        .run(tauri::generate_context!())
        .context("error while running tauri application")
}

#[cfg(not(feature = "tauri"))]
fn main() {
    eprintln!("This binary requires the 'tauri' feature to be enabled.");
    eprintln!("Build with: cargo build -p caisse-desktop --features tauri");
    std::process::exit(1);
}
