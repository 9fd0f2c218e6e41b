//! Sales domain module: cart accumulator and sale ledger.
//!
//! Deterministic domain logic only (no IO, no storage, no printing). The
//! desktop controller owns one [`Cart`] and one [`Ledger`] and persists the
//! ledger after every recorded sale.

pub mod cart;
pub mod ledger;
pub mod sale;
pub mod samples;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY, Totals};
pub use ledger::Ledger;
pub use sale::{PaymentMethod, Sale, SaleLine};
