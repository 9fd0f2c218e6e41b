//! `caisse-desktop`
//!
//! **Responsibility:** the point-of-sale controller and its desktop shell.
//!
//! This crate provides:
//! - [`PosState`], the single owner of catalog, cart and ledger
//! - the checkout flow and receipt rendering/printing
//! - environment configuration and store selection
//! - Tauri commands (behind the `tauri` feature)

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod printer;
pub mod receipt;
pub mod state;

#[cfg(feature = "tauri")]
pub mod commands;

pub use bootstrap::{bootstrap, bootstrap_with, open_store};
pub use config::{AppConfig, StoreKind};
pub use error::{AppError, AppResult, CheckoutError};
pub use printer::{LogPrinter, MemoryPrinter, PrintError, Printer};
pub use receipt::{Receipt, ReceiptLine};
pub use state::{CompletedSale, PosState};
