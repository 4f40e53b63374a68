//! Product identifiers.
//!
//! Products are keyed by the opaque string the host page puts in
//! `data-product-id`. A cart holds at most one line item per `ProductId`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing a [`ProductId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductIdError {
    #[error("product id cannot be empty")]
    Empty,
}

/// Type-safe product identifier.
///
/// Serialized transparently as a JSON string so the stored cart stays in the
/// `{id, name, price, image, quantity}` record shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] if the value is empty or only whitespace.
    pub fn parse(value: impl Into<String>) -> Result<Self, ProductIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(Self(value))
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_value() {
        let id = ProductId::parse("p1").unwrap();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse("   "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::parse("sku-42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-42\"");
    }

    #[test]
    fn test_deserialize_rejects_empty_string() {
        let result: Result<ProductId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
