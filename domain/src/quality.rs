//! Data-quality warnings
//!
//! Non-fatal findings that downgrade an item's contribution without
//! aborting the respondent. Fatal conditions are [`crate::ScoringError`].

use crate::dimension::TraitDimension;
use crate::item::ItemId;
use serde::{Deserialize, Serialize};

/// A non-fatal data-quality finding surfaced during scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataQualityWarning {
    /// The item bank's dimension label was not recognized; the item
    /// contributes to every trait at the minor weight only.
    UnknownPrimaryDimension { item: ItemId },

    /// Full-precision expansion found no evaluator data for a minor
    /// dimension and fell back to the neutral value.
    MissingDimensionData {
        item: ItemId,
        dimension: TraitDimension,
    },
}

impl DataQualityWarning {
    /// The item this warning is about.
    pub fn item(&self) -> &ItemId {
        match self {
            DataQualityWarning::UnknownPrimaryDimension { item } => item,
            DataQualityWarning::MissingDimensionData { item, .. } => item,
        }
    }
}

impl std::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQualityWarning::UnknownPrimaryDimension { item } => {
                write!(f, "item {item}: unrecognized primary dimension")
            }
            DataQualityWarning::MissingDimensionData { item, dimension } => {
                write!(
                    f,
                    "item {item}: no evaluator data for {dimension}, using neutral"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = DataQualityWarning::MissingDimensionData {
            item: ItemId::new("q07"),
            dimension: TraitDimension::Agreeableness,
        };
        assert_eq!(
            warning.to_string(),
            "item q07: no evaluator data for agreeableness, using neutral"
        );
        assert_eq!(warning.item().as_str(), "q07");
    }
}
