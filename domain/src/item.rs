//! Assessment items
//!
//! Items come from an external item bank; this core only reads the fields
//! that drive scoring: which trait the item measures and whether its
//! behavioral polarity is inverted.

use crate::dimension::TraitDimension;
use serde::{Deserialize, Serialize};

/// Identifier for an assessment item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single assessment item, read-only from this core's perspective
///
/// `primary_dimension` is `None` when the item bank carries a dimension
/// label this core does not recognize. Such items still get scored but
/// contribute to no trait at the primary weight (a data-quality warning,
/// not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub primary_dimension: Option<TraitDimension>,
    pub reverse_keyed: bool,
}

impl Item {
    /// Create an item measuring the given dimension.
    pub fn new(id: impl Into<ItemId>, primary_dimension: TraitDimension) -> Self {
        Self {
            id: id.into(),
            primary_dimension: Some(primary_dimension),
            reverse_keyed: false,
        }
    }

    /// Mark the item as reverse-keyed.
    pub fn reverse_keyed(mut self) -> Self {
        self.reverse_keyed = true;
        self
    }

    /// Create an item whose dimension label was not recognized.
    pub fn with_unknown_dimension(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            primary_dimension: None,
            reverse_keyed: false,
        }
    }
}

impl From<&str> for Item {
    /// Convenience for tests: an item id with an unknown dimension.
    fn from(id: &str) -> Self {
        Item::with_unknown_dimension(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = Item::new("q01", TraitDimension::Extraversion).reverse_keyed();
        assert_eq!(item.id.as_str(), "q01");
        assert_eq!(item.primary_dimension, Some(TraitDimension::Extraversion));
        assert!(item.reverse_keyed);
    }

    #[test]
    fn test_unknown_dimension_item() {
        let item = Item::with_unknown_dimension("q99");
        assert!(item.primary_dimension.is_none());
        assert!(!item.reverse_keyed);
    }
}
