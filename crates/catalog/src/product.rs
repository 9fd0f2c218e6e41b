use serde::{Deserialize, Serialize};

use caisse_core::{CategoryId, DomainError, DomainResult, Entity, Money, ProductId};

/// Catalog product.
///
/// Identity is assigned once at creation and never reused; every other field
/// may be edited later without affecting sales already recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    price: Money,
    category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Product {
    /// Create a product with a freshly generated id from validated form data.
    pub fn create(draft: ProductDraft) -> DomainResult<Self> {
        Self::with_id(ProductId::generate(), draft)
    }

    /// Build a product for a known id (edits, fixtures, imports).
    pub fn with_id(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        let draft = draft.validated()?;
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category_id: draft.category_id,
            image: draft.image,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Form data pre-filled from this product (edit dialog).
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category_id: self.category_id.clone(),
            image: self.image.clone(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Product form data: every product field except the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub category_id: CategoryId,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, category_id: impl Into<CategoryId>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price: Money::new(price),
            category_id: category_id.into(),
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Normalize and validate the form.
    ///
    /// Name is trimmed and must be non-empty; price must be finite and
    /// non-negative; a blank image reference is treated as no image.
    fn validated(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let price = Money::price(self.price.amount())?;

        let image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        Ok(Self {
            name,
            description: self.description.trim().to_string(),
            price,
            category_id: self.category_id,
            image,
        })
    }
}
