//! Print boundary.

use std::sync::Mutex;

use thiserror::Error;

use crate::receipt::Receipt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintError {
    #[error("printer unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can put a receipt on paper (or pretend to).
pub trait Printer: Send + Sync {
    fn print(&self, receipt: &Receipt) -> Result<(), PrintError>;
}

/// Simulated printer: logs the text rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPrinter;

impl Printer for LogPrinter {
    fn print(&self, receipt: &Receipt) -> Result<(), PrintError> {
        tracing::info!(
            sale_id = %receipt.sale_id,
            total = %receipt.total.display(),
            "printing receipt\n{}",
            receipt.to_text()
        );
        Ok(())
    }
}

/// Keeps every printed receipt in memory (tests, headless runs).
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    printed: Mutex<Vec<Receipt>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> Vec<Receipt> {
        self.printed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Printer for MemoryPrinter {
    fn print(&self, receipt: &Receipt) -> Result<(), PrintError> {
        self.printed
            .lock()
            .map_err(|_| PrintError::Unavailable("printer state poisoned".into()))?
            .push(receipt.clone());
        Ok(())
    }
}

impl<P: Printer + ?Sized> Printer for std::sync::Arc<P> {
    fn print(&self, receipt: &Receipt) -> Result<(), PrintError> {
        (**self).print(receipt)
    }
}
