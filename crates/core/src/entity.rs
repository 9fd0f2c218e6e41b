//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products, categories and sales are entities: two records with the same id
/// are the same record, whatever their other fields say. Catalog updates and
/// ledger lookups match on [`Entity::id`] only.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
