//! Trichotomous measurement scale
//!
//! All raw judgments live on the scale {1, 3, 5}. Evaluators are never asked
//! for in-between values; fractional scores only appear downstream, as
//! consensus means. [`RawScore`] makes the scale a type-level guarantee.

use crate::core::error::ScoringError;
use serde::{Deserialize, Serialize};

/// Lowest scale value.
pub const SCALE_MIN: u8 = 1;
/// Highest scale value.
pub const SCALE_MAX: u8 = 5;
/// Neutral midpoint of the scale.
pub const NEUTRAL: u8 = 3;
/// Maximum spread between two scale values.
pub const SCALE_RANGE: f64 = 4.0;
/// Maximum standard deviation attainable on the scale (used for rescaling
/// dispersion into [0,1]).
pub const MAX_STD_DEV: f64 = 2.0;

/// A validated raw score on the trichotomous scale
///
/// # Example
///
/// ```
/// use panel_domain::scale::RawScore;
///
/// let score = RawScore::new(5).unwrap();
/// assert_eq!(score.value(), 5);
/// assert_eq!(score.reverse().value(), 1);
///
/// assert!(RawScore::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RawScore(u8);

impl RawScore {
    /// Lowest judgment on the scale.
    pub const LOW: RawScore = RawScore(SCALE_MIN);
    /// Neutral judgment.
    pub const MID: RawScore = RawScore(NEUTRAL);
    /// Highest judgment on the scale.
    pub const HIGH: RawScore = RawScore(SCALE_MAX);

    /// Create a raw score, rejecting anything outside {1, 3, 5}.
    pub fn new(value: u8) -> Result<Self, ScoringError> {
        match value {
            1 | 3 | 5 => Ok(Self(value)),
            other => Err(ScoringError::OutOfScale(other)),
        }
    }

    /// The underlying scale value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The scale value as a float, for averaging.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Reverse-keyed transform: v → 6 − v (1↔5, 3 fixed).
    ///
    /// This is an involution: `s.reverse().reverse() == s`.
    pub fn reverse(&self) -> RawScore {
        RawScore(SCALE_MIN + SCALE_MAX - self.0)
    }
}

impl TryFrom<u8> for RawScore {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RawScore::new(value)
    }
}

impl From<RawScore> for u8 {
    fn from(score: RawScore) -> u8 {
        score.0
    }
}

impl std::fmt::Display for RawScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reverse-keyed transform for fractional scores: v → 6 − v.
///
/// Consensus scores are rational, so the reverse map has to work off-scale
/// too (e.g. 3.67 → 2.33).
pub fn reverse_value(value: f64) -> f64 {
    f64::from(SCALE_MIN) + f64::from(SCALE_MAX) - value
}

/// Snap a fractional score to the nearest scale value.
///
/// Rounds half away from zero, then maps toward the nearer extreme:
/// ≤2 → 1, ≥4 → 5, otherwise 3.
pub fn snap(value: f64) -> RawScore {
    let rounded = value.round() as i64;
    if rounded <= 2 {
        RawScore::LOW
    } else if rounded >= 4 {
        RawScore::HIGH
    } else {
        RawScore::MID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scores() {
        for v in [1u8, 3, 5] {
            assert_eq!(RawScore::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_out_of_scale_rejected() {
        for v in [0u8, 2, 4, 6, 255] {
            assert!(matches!(
                RawScore::new(v),
                Err(ScoringError::OutOfScale(got)) if got == v
            ));
        }
    }

    #[test]
    fn test_reverse_is_involution() {
        for v in [1u8, 3, 5] {
            let score = RawScore::new(v).unwrap();
            assert_eq!(score.reverse().reverse(), score);
        }
    }

    #[test]
    fn test_reverse_mapping() {
        assert_eq!(RawScore::LOW.reverse(), RawScore::HIGH);
        assert_eq!(RawScore::MID.reverse(), RawScore::MID);
        assert_eq!(RawScore::HIGH.reverse(), RawScore::LOW);
    }

    #[test]
    fn test_reverse_value_fractional() {
        assert!((reverse_value(3.67) - 2.33).abs() < 1e-9);
        assert_eq!(reverse_value(1.0), 5.0);
        assert_eq!(reverse_value(3.0), 3.0);
    }

    #[test]
    fn test_snap_toward_extremes() {
        assert_eq!(snap(1.0), RawScore::LOW);
        assert_eq!(snap(1.9), RawScore::LOW);
        assert_eq!(snap(2.4), RawScore::LOW);
        assert_eq!(snap(2.6), RawScore::MID);
        assert_eq!(snap(3.0), RawScore::MID);
        assert_eq!(snap(3.4), RawScore::MID);
        assert_eq!(snap(3.6), RawScore::HIGH);
        assert_eq!(snap(5.0), RawScore::HIGH);
    }

    #[test]
    fn test_serde_round_trip() {
        let score = RawScore::HIGH;
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, "5");
        let back: RawScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }

    #[test]
    fn test_serde_rejects_out_of_scale() {
        assert!(serde_json::from_str::<RawScore>("2").is_err());
    }
}
