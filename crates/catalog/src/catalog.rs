//! In-memory catalog store.

use caisse_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

use crate::category::Category;
use crate::product::Product;

/// Products and categories available for sale.
///
/// Insertion order is preserved (it is the display order of the product
/// grid). Identity is the only matching key for updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Product grid filter: name search plus optional category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name; empty matches all.
    pub search: String,
    /// `None` means "all categories".
    pub category: Option<CategoryId>,
}

impl ProductFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            category: None,
        }
    }

    /// Build a filter from raw grid inputs. A missing, blank or `"all"`
    /// category selects every category.
    pub fn from_params(search: Option<String>, category: Option<String>) -> Self {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && c != ALL_CATEGORIES)
            .map(CategoryId::from);
        Self {
            search: search.unwrap_or_default(),
            category,
        }
    }

    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty() || product.name().to_lowercase().contains(&needle);
        let matches_category = self
            .category
            .as_ref()
            .is_none_or(|c| product.category_id() == c);
        matches_search && matches_category
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Append a new product. Identities are never reused.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        if self.product(product.id()).is_some() {
            return Err(DomainError::conflict(format!(
                "product {} already exists",
                product.id()
            )));
        }
        self.products.push(product);
        Ok(())
    }

    /// Replace the product with the same id, keeping its position.
    pub fn update_product(&mut self, product: Product) -> DomainResult<()> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or_else(|| DomainError::not_found(format!("product {}", product.id())))?;
        *slot = product;
        Ok(())
    }

    /// Remove a product; recorded sales keep their own snapshot.
    pub fn remove_product(&mut self, id: &ProductId) -> Option<Product> {
        let idx = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(idx))
    }

    pub fn add_category(&mut self, category: Category) -> DomainResult<()> {
        if self.category(category.id()).is_some() {
            return Err(DomainError::conflict(format!(
                "category {} already exists",
                category.id()
            )));
        }
        self.categories.push(category);
        Ok(())
    }

    /// Products matching the filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| filter.matches(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductDraft;
    use crate::samples;

    fn sample() -> Catalog {
        Catalog::new(samples::products(), samples::categories())
    }

    #[test]
    fn add_product_rejects_duplicate_id() {
        let mut catalog = sample();
        let dup = catalog.products()[0].clone();
        let err = catalog.add_product(dup).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(catalog.products().len(), 8);
    }

    #[test]
    fn update_product_replaces_in_place() {
        let mut catalog = sample();
        let id = ProductId::new("prod-2");
        let edited = Product::with_id(id.clone(), ProductDraft::new("Thé vert", 2.20, "cat-1")).unwrap();

        catalog.update_product(edited).unwrap();

        assert_eq!(catalog.products()[1].name(), "Thé vert");
        assert_eq!(catalog.product(&id).unwrap().price().amount(), 2.20);
        assert_eq!(catalog.products().len(), 8);
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let mut catalog = sample();
        let ghost = Product::with_id(ProductId::new("prod-99"), ProductDraft::new("X", 1.0, "cat-1")).unwrap();
        assert!(matches!(
            catalog.update_product(ghost).unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn remove_product_returns_removed() {
        let mut catalog = sample();
        let removed = catalog.remove_product(&ProductId::new("prod-1")).unwrap();
        assert_eq!(removed.name(), "Café");
        assert!(catalog.product(&ProductId::new("prod-1")).is_none());
        assert!(catalog.remove_product(&ProductId::new("prod-1")).is_none());
    }

    #[test]
    fn filter_combines_search_and_category() {
        let catalog = sample();

        let drinks = ProductFilter::default().in_category("cat-1");
        assert_eq!(catalog.filter(&drinks).count(), 3);

        let search = ProductFilter::search("CR");
        let names: Vec<&str> = catalog.filter(&search).map(|p| p.name()).collect();
        assert_eq!(names, vec!["Crêpe", "Croissant"]);

        let both = ProductFilter::search("cr").in_category("cat-3");
        let names: Vec<&str> = catalog.filter(&both).map(|p| p.name()).collect();
        assert_eq!(names, vec!["Crêpe"]);
    }

    #[test]
    fn add_category_rejects_duplicate() {
        let mut catalog = sample();
        assert!(catalog.add_category(Category::new("cat-1", "Autre")).is_err());
        catalog.add_category(Category::new("cat-5", "Glaces")).unwrap();
        assert_eq!(catalog.category(&CategoryId::new("cat-5")).unwrap().name, "Glaces");
    }

    #[test]
    fn all_or_blank_category_param_means_no_filter() {
        let catalog = sample();
        for raw in [Some("all"), Some(""), Some("  "), None] {
            let filter = ProductFilter::from_params(None, raw.map(str::to_string));
            assert_eq!(filter.category, None);
            assert_eq!(catalog.filter(&filter).count(), 8);
        }

        let drinks = ProductFilter::from_params(Some("th".into()), Some("cat-1".into()));
        let names: Vec<&str> = catalog.filter(&drinks).map(|p| p.name()).collect();
        assert_eq!(names, vec!["Thé"]);
    }
}
