//! `caisse-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog,
//! sales and reporting crates (no IO, no storage, no presentation).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId, SaleId};
pub use money::{Money, TaxRate};
pub use value_object::ValueObject;
