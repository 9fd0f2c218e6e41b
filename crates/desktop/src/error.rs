use thiserror::Error;

use caisse_core::DomainError;
use caisse_storage::StorageError;

use crate::printer::PrintError;

pub type AppResult<T> = Result<T, AppError>;

/// Checkout refused before anything was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,

    #[error("select a payment method before checking out")]
    MissingPaymentMethod,
}

/// Errors surfaced by the desktop controller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("printing failed: {0}")]
    Print(#[from] PrintError),
}
