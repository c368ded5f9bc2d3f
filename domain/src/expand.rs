//! Dimension expansion
//!
//! Maps an item-level consensus score (tied to one trait dimension) onto a
//! full five-dimension vector, applying the reverse-keyed transform where
//! the item demands it.
//!
//! Two fill strategies exist as an explicit tagged mode rather than two
//! parallel implementations:
//!
//! - [`FillMode::NeutralFill`] snaps the primary dimension back onto the
//!   {1, 3, 5} scale and holds every other dimension at neutral 3.
//! - [`FillMode::FullPrecision`] keeps the consensus score's fractional
//!   precision and averages whatever per-dimension data the evaluators
//!   supplied for the minor dimensions.

use crate::consensus::ConsensusResult;
use crate::dimension::{DimensionVector, TraitDimension};
use crate::item::Item;
use crate::judgment::Judgment;
use crate::quality::DataQualityWarning;
use crate::scale::{reverse_value, snap};
use serde::{Deserialize, Serialize};

/// How minor dimensions are populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Primary snapped to the scale, minor dimensions neutral.
    #[default]
    NeutralFill,
    /// Primary unrounded, minor dimensions averaged from evaluator data.
    FullPrecision,
}

/// Result of expanding one item's consensus onto all five dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub vector: DimensionVector,
    pub warnings: Vec<DataQualityWarning>,
}

/// Expands item-level consensus scores into dimension vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionExpander {
    mode: FillMode,
}

impl DimensionExpander {
    pub fn new(mode: FillMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> FillMode {
        self.mode
    }

    /// Expand a consensus result onto all five dimensions.
    ///
    /// `judgments` are the judgments collected for this item; only their
    /// optional per-dimension data is consulted, and only in
    /// full-precision mode. The returned vector always has all five
    /// dimensions populated.
    pub fn expand(
        &self,
        result: &ConsensusResult,
        item: &Item,
        judgments: &[Judgment],
    ) -> Expansion {
        // Reverse transform comes first; the neutral fill value 3 is the
        // transform's fixed point, so ordering is only observable for the
        // primary dimension.
        let consensus = if item.reverse_keyed {
            reverse_value(result.consensus_score)
        } else {
            result.consensus_score
        };

        let mut warnings = Vec::new();
        let mut vector = DimensionVector::neutral();

        for dimension in TraitDimension::ALL {
            let score = if item.primary_dimension == Some(dimension) {
                match self.mode {
                    FillMode::NeutralFill => snap(consensus).as_f64(),
                    FillMode::FullPrecision => consensus,
                }
            } else {
                self.minor_dimension_score(dimension, item, judgments, &mut warnings)
            };
            vector.set(dimension, score);
        }

        if item.primary_dimension.is_none() {
            warnings.push(DataQualityWarning::UnknownPrimaryDimension {
                item: item.id.clone(),
            });
        }

        Expansion { vector, warnings }
    }

    /// Score for a dimension the item does not primarily measure.
    fn minor_dimension_score(
        &self,
        dimension: TraitDimension,
        item: &Item,
        judgments: &[Judgment],
        warnings: &mut Vec<DataQualityWarning>,
    ) -> f64 {
        match self.mode {
            FillMode::NeutralFill => 3.0,
            FillMode::FullPrecision => {
                let values: Vec<f64> = judgments
                    .iter()
                    .filter_map(|j| j.dimension_score(dimension))
                    .map(|score| {
                        if item.reverse_keyed {
                            reverse_value(score.as_f64())
                        } else {
                            score.as_f64()
                        }
                    })
                    .collect();

                if values.is_empty() {
                    warnings.push(DataQualityWarning::MissingDimensionData {
                        item: item.id.clone(),
                        dimension,
                    });
                    3.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
        }
    }
}
