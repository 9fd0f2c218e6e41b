//! Product catalog domain module.
//!
//! Products and categories available for sale, plus the in-memory catalog
//! store that the desktop controller owns. Pure domain logic (no IO).

pub mod catalog;
pub mod category;
pub mod product;
pub mod samples;

pub use catalog::{ALL_CATEGORIES, Catalog, ProductFilter};
pub use category::Category;
pub use product::{Product, ProductDraft};
