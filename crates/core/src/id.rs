//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings so records persisted by earlier versions
//! (`"prod-1"`, `"cat-2"`, `"sale-1712345678901"`) keep loading unchanged.
//! Fresh identifiers are generated from UUIDv7 (time-ordered).

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

/// Identifier of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an existing identifier string.
            ///
            /// Prefer passing IDs explicitly in tests for determinism.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_string_id!(ProductId, "ProductId");
impl_string_id!(CategoryId, "CategoryId");
impl_string_id!(SaleId, "SaleId");

impl ProductId {
    /// Generate a fresh product identifier (never reused).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl SaleId {
    /// Generate a fresh sale identifier (`sale-<uuidv7>`).
    ///
    /// Unique even when two sales complete within the same millisecond.
    pub fn generate() -> Self {
        Self(format!("sale-{}", Uuid::now_v7()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = SaleId::generate();
        let b = SaleId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("sale-"));
    }

    #[test]
    fn parse_rejects_blank_identifier() {
        let err = "   ".parse::<ProductId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ProductId::new("prod-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"prod-1\"");

        let back: ProductId = serde_json::from_str("\"prod-1\"").unwrap();
        assert_eq!(back, id);
    }
}
