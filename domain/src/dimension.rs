//! Trait dimensions and per-item dimension vectors

use serde::{Deserialize, Serialize};

/// One of the five personality trait dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDimension {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl TraitDimension {
    /// All five dimensions, in canonical order.
    pub const ALL: [TraitDimension; 5] = [
        TraitDimension::Openness,
        TraitDimension::Conscientiousness,
        TraitDimension::Extraversion,
        TraitDimension::Agreeableness,
        TraitDimension::Neuroticism,
    ];

    /// Short display name (e.g., "openness").
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitDimension::Openness => "openness",
            TraitDimension::Conscientiousness => "conscientiousness",
            TraitDimension::Extraversion => "extraversion",
            TraitDimension::Agreeableness => "agreeableness",
            TraitDimension::Neuroticism => "neuroticism",
        }
    }
}

impl std::fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A score for every one of the five trait dimensions
///
/// The five-entry invariant holds by construction: there is one field per
/// dimension, so a vector can never be partial.
///
/// # Example
///
/// ```
/// use panel_domain::dimension::{DimensionVector, TraitDimension};
///
/// let mut vector = DimensionVector::neutral();
/// vector.set(TraitDimension::Openness, 5.0);
/// assert_eq!(vector.get(TraitDimension::Openness), 5.0);
/// assert_eq!(vector.get(TraitDimension::Neuroticism), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionVector {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl DimensionVector {
    /// A vector with every dimension at the neutral scale value 3.
    pub fn neutral() -> Self {
        Self::uniform(3.0)
    }

    /// A vector with every dimension at the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            openness: value,
            conscientiousness: value,
            extraversion: value,
            agreeableness: value,
            neuroticism: value,
        }
    }

    /// Score for a single dimension.
    pub fn get(&self, dimension: TraitDimension) -> f64 {
        match dimension {
            TraitDimension::Openness => self.openness,
            TraitDimension::Conscientiousness => self.conscientiousness,
            TraitDimension::Extraversion => self.extraversion,
            TraitDimension::Agreeableness => self.agreeableness,
            TraitDimension::Neuroticism => self.neuroticism,
        }
    }

    /// Set the score for a single dimension.
    pub fn set(&mut self, dimension: TraitDimension, value: f64) {
        match dimension {
            TraitDimension::Openness => self.openness = value,
            TraitDimension::Conscientiousness => self.conscientiousness = value,
            TraitDimension::Extraversion => self.extraversion = value,
            TraitDimension::Agreeableness => self.agreeableness = value,
            TraitDimension::Neuroticism => self.neuroticism = value,
        }
    }

    /// Iterate over all five (dimension, score) pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (TraitDimension, f64)> + '_ {
        TraitDimension::ALL.iter().map(|&d| (d, self.get(d)))
    }
}

impl Default for DimensionVector {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_vector() {
        let vector = DimensionVector::neutral();
        for dimension in TraitDimension::ALL {
            assert_eq!(vector.get(dimension), 3.0);
        }
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut vector = DimensionVector::neutral();
        for (i, dimension) in TraitDimension::ALL.iter().enumerate() {
            vector.set(*dimension, i as f64);
        }
        for (i, dimension) in TraitDimension::ALL.iter().enumerate() {
            assert_eq!(vector.get(*dimension), i as f64);
        }
    }

    #[test]
    fn test_entries_has_five_keys() {
        let vector = DimensionVector::uniform(1.0);
        assert_eq!(vector.entries().count(), 5);
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(TraitDimension::Openness.to_string(), "openness");
        assert_eq!(TraitDimension::Neuroticism.to_string(), "neuroticism");
    }

    #[test]
    fn test_dimension_serde_snake_case() {
        let json = serde_json::to_string(&TraitDimension::Conscientiousness).unwrap();
        assert_eq!(json, "\"conscientiousness\"");
    }
}
