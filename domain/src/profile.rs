//! Respondent-level trait aggregation
//!
//! Folds all of a respondent's per-item dimension vectors into five
//! weighted trait scores and a deterministic typology code. A pure fold
//! over already-materialized inputs: no hidden state, identical inputs
//! always produce an identical profile.

use crate::core::error::ScoringError;
use crate::dimension::{DimensionVector, TraitDimension};
use crate::item::Item;
use crate::quality::DataQualityWarning;
use serde::{Deserialize, Serialize};

/// Weight an item carries toward its primary dimension.
pub const PRIMARY_WEIGHT: f64 = 0.7;
/// Weight an item carries toward each of the other four dimensions.
///
/// Note the five weights sum to 1.075, not 1.0. This is a long-standing
/// property of the scoring scheme, kept as-is; normalizing by the summed
/// weights keeps trait scores on the scale regardless.
pub const MINOR_WEIGHT: f64 = 0.075;

/// The 4-letter typology classification
///
/// A pure function of the five trait scores; see [`TypologyCode::from_traits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypologyCode(String);

impl TypologyCode {
    /// Derive the code from a five-trait score vector.
    ///
    /// - E/I from extraversion vs. neuroticism
    /// - S/N from openness
    /// - T/F from agreeableness
    /// - J/P from conscientiousness
    pub fn from_traits(scores: &DimensionVector) -> Self {
        let o = scores.get(TraitDimension::Openness);
        let c = scores.get(TraitDimension::Conscientiousness);
        let e = scores.get(TraitDimension::Extraversion);
        let a = scores.get(TraitDimension::Agreeableness);
        let n = scores.get(TraitDimension::Neuroticism);

        let extravert = (e + (5.0 - n)) > ((5.0 - e) + n);
        let mut code = String::with_capacity(4);
        code.push(if extravert { 'E' } else { 'I' });
        code.push(if o <= 3.0 { 'S' } else { 'N' });
        code.push(if a <= 3.0 { 'T' } else { 'F' });
        code.push(if c > 3.0 { 'J' } else { 'P' });
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypologyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final weighted trait scores for one respondent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    /// Weighted trait score per dimension, clamped to [1, 5].
    pub scores: DimensionVector,
    /// Deterministic typology classification.
    pub typology: TypologyCode,
    /// Number of items that contributed.
    pub items_scored: usize,
}

/// Aggregation output: the profile plus any data-quality findings
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub profile: TraitProfile,
    pub warnings: Vec<DataQualityWarning>,
}

/// Folds per-item dimension vectors into a trait profile
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileAggregator;

impl ProfileAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate one respondent's item vectors into a trait profile.
    ///
    /// `vectors` and `items` are parallel sequences; every item
    /// contributes to every dimension (minor dimensions are always
    /// populated by expansion), at the primary weight for its own
    /// dimension and the minor weight elsewhere. An item with no
    /// recognized primary dimension contributes at the minor weight
    /// everywhere and is reported as a warning, not an error.
    pub fn aggregate(
        &self,
        vectors: &[DimensionVector],
        items: &[Item],
    ) -> Result<Aggregation, ScoringError> {
        if vectors.len() != items.len() {
            return Err(ScoringError::MismatchedInputs {
                vectors: vectors.len(),
                items: items.len(),
            });
        }

        let mut warnings = Vec::new();
        for item in items {
            if item.primary_dimension.is_none() {
                warnings.push(DataQualityWarning::UnknownPrimaryDimension {
                    item: item.id.clone(),
                });
            }
        }

        let mut scores = DimensionVector::neutral();
        for dimension in TraitDimension::ALL {
            let mut weighted_sum = 0.0;
            let mut weight_sum = 0.0;

            for (vector, item) in vectors.iter().zip(items) {
                let weight = if item.primary_dimension == Some(dimension) {
                    PRIMARY_WEIGHT
                } else {
                    MINOR_WEIGHT
                };
                weighted_sum += vector.get(dimension) * weight;
                weight_sum += weight;
            }

            if weight_sum > 0.0 {
                scores.set(dimension, (weighted_sum / weight_sum).clamp(1.0, 5.0));
            }
        }

        let typology = TypologyCode::from_traits(&scores);
        Ok(Aggregation {
            profile: TraitProfile {
                scores,
                typology,
                items_scored: items.len(),
            },
            warnings,
        })
    }
}
