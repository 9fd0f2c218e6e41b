//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. [`crate::Money`] and [`crate::TaxRate`] are the value
//! objects of this workspace, as are the immutable sale line snapshots.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (two prices of 1.50 are the same price)
/// - **Entity**: has identity (two products named "Café" with different ids
///   are different products)
///
/// Value objects are immutable: to "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
