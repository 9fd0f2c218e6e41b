use std::sync::Arc;

use chrono::{TimeZone, Utc};

use caisse_catalog::{Category, ProductDraft, ProductFilter};
use caisse_core::{Entity, ProductId};
use caisse_desktop::{AppConfig, AppError, MemoryPrinter, PosState, StoreKind, bootstrap_with};
use caisse_reporting::UNKNOWN_PRODUCT;
use caisse_sales::PaymentMethod;
use caisse_storage::{JsonDirStore, MemoryStore, SALES_KEY, StorageError};

fn config_in(dir: &std::path::Path, store: StoreKind) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        store,
        seed_samples: true,
        shop_name: "Auto-Caisse Maestro".into(),
    }
}

fn memory_state() -> PosState {
    PosState::open(
        MemoryStore::new(),
        MemoryPrinter::new(),
        &AppConfig {
            store: StoreKind::Memory,
            ..AppConfig::default()
        },
    )
    .unwrap()
}

#[test]
fn sample_dashboard_figures() {
    let state = memory_state();
    let today = Utc::now().date_naive();
    let dashboard = state.dashboard_at(today, &Utc);

    assert_eq!(dashboard.sales_count, 5);
    assert_eq!(dashboard.total_revenue.rounded(), 40.44);
    assert!((dashboard.average_sale.amount() - 8.088).abs() < 1e-9);
    assert_eq!(dashboard.payment_methods.card, 3);
    assert_eq!(dashboard.payment_methods.cash, 2);

    assert_eq!(dashboard.top_products[0].name, "Café");
    assert_eq!(dashboard.top_products[0].quantity, 5);

    assert_eq!(dashboard.daily_revenue.len(), 7);
    let week: f64 = dashboard.daily_revenue.iter().map(|d| d.total.amount()).sum();
    assert!((week - 40.44).abs() < 1e-9);
}

#[test]
fn cart_scenario_totals() {
    let mut state = memory_state();
    let cafe = ProductId::new("prod-1");
    state.add_to_cart(&cafe).unwrap();
    state.increment(&cafe).unwrap();
    state.add_to_cart(&ProductId::new("prod-6")).unwrap();

    let totals = state.cart_totals();
    assert_eq!(totals.subtotal.display(), "4.20 €");
    assert_eq!(totals.tax.display(), "0.84 €");
    assert_eq!(totals.total.display(), "5.04 €");

    state.decrement(&cafe).unwrap();
    assert!(state.decrement(&cafe).is_err());
    assert_eq!(state.cart().line(&cafe).unwrap().quantity(), 1);

    state.clear_cart();
    state.clear_cart();
    assert!(state.cart().is_empty());
}

#[test]
fn deleted_product_shows_placeholder_in_top_products() {
    let mut state = memory_state();
    state.delete_product(&ProductId::new("prod-1")).unwrap();

    let dashboard = state.dashboard_at(Utc::now().date_naive(), &Utc);
    let first = &dashboard.top_products[0];
    assert_eq!(first.product_id, ProductId::new("prod-1"));
    assert_eq!(first.name, UNKNOWN_PRODUCT);
    assert_eq!(first.quantity, 5);
}

#[test]
fn catalog_management_round_trip() {
    let mut state = memory_state();
    state
        .add_category(Category::new("cat-5", "Glaces").with_color("#FF0000"))
        .unwrap();
    let glace = state
        .create_product(ProductDraft::new("Glace vanille", 2.5, "cat-5").with_description("Deux boules"))
        .unwrap();

    let filter = ProductFilter::search("GLACE").in_category("cat-5");
    let found = state.filter_products(&filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), glace.id());

    let err = state
        .create_product(ProductDraft::new("   ", 1.0, "cat-5"))
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    let err = state
        .add_category(Category::new("cat-5", "Doublon"))
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));
}

#[test]
fn sales_survive_restart_with_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), StoreKind::Json);
    let at = Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap();

    let sale_id = {
        let mut state = bootstrap_with(&config, MemoryPrinter::new()).unwrap();
        state.add_to_cart(&ProductId::new("prod-8")).unwrap();
        let done = state.checkout_at(Some(PaymentMethod::Cash), at).unwrap();
        done.sale.id().clone()
    };

    let state = bootstrap_with(&config, MemoryPrinter::new()).unwrap();
    assert_eq!(state.sales().len(), 6);
    assert_eq!(state.sales()[0].id(), &sale_id);
    assert_eq!(state.sales()[0].recorded_at(), at);
    assert_eq!(state.sales()[0].payment_method(), PaymentMethod::Cash);
    assert!(state.cart().is_empty());
}

#[test]
fn sales_survive_restart_with_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), StoreKind::Sqlite);

    {
        let mut state = bootstrap_with(&config, MemoryPrinter::new()).unwrap();
        state.add_to_cart(&ProductId::new("prod-1")).unwrap();
        state.checkout(Some(PaymentMethod::Card)).unwrap();
        state.delete_product(&ProductId::new("prod-2")).unwrap();
    }

    let state = bootstrap_with(&config, MemoryPrinter::new()).unwrap();
    assert_eq!(state.sales().len(), 6);
    assert_eq!(state.products().len(), 7);
}

#[test]
fn corrupt_sales_file_refuses_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), StoreKind::Json);
    drop(bootstrap_with(&config, MemoryPrinter::new()).unwrap());

    std::fs::write(config.json_dir().join(format!("{SALES_KEY}.json")), "{ oops").unwrap();

    let store = JsonDirStore::open(config.json_dir()).unwrap();
    match PosState::open(store, MemoryPrinter::new(), &config).unwrap_err() {
        AppError::Storage(StorageError::Corrupt { key, .. }) => assert_eq!(key, SALES_KEY),
        other => panic!("Expected Corrupt error, got {other:?}"),
    }
}

#[test]
fn checkout_prints_receipt_with_html() {
    let printer = Arc::new(MemoryPrinter::new());
    let mut state = PosState::open(MemoryStore::new(), printer.clone(), &AppConfig::default()).unwrap();
    state.add_to_cart(&ProductId::new("prod-5")).unwrap();
    state.set_cart_quantity(&ProductId::new("prod-5"), 2).unwrap();

    let done = state.checkout(Some(PaymentMethod::Card)).unwrap();
    let printed = printer.printed();
    assert_eq!(printed.len(), 1);
    assert_eq!(printed[0], done.receipt);

    let html = state.receipt_for(done.sale.id()).unwrap().to_html();
    assert!(html.contains("Crêpe"));
    assert!(html.contains("TVA (20%)"));
    assert!(html.contains("Carte"));
}
