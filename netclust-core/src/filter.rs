//! Weight-based edge classification.
//!
//! The same predicate runs at indexing time, where it decides which edges
//! enter the edge table, and again at clustering time against the cutoff of
//! that run.

use std::fmt;

use crate::{Result, error::NetclustError};

/// Meaning of an edge weight.
///
/// # Examples
/// ```
/// use netclust_core::WeightType;
///
/// assert_eq!(WeightType::default(), WeightType::Similarity);
/// assert_eq!(WeightType::Distance.default_cutoff(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeightType {
    /// Larger weights mean closer nodes; valid weights are `>= 0`.
    #[default]
    Similarity,
    /// Smaller weights mean closer nodes; valid weights lie in `[0, 1]`.
    Distance,
}

impl WeightType {
    /// Cutoff used when none is supplied: keep every valid edge.
    #[must_use]
    pub const fn default_cutoff(self) -> f32 {
        match self {
            Self::Similarity => 0.0,
            Self::Distance => 1.0,
        }
    }

    /// Lower-case name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Similarity => "similarity",
            Self::Distance => "distance",
        }
    }

    fn is_valid_weight(self, weight: f32) -> bool {
        match self {
            Self::Similarity => weight >= 0.0,
            Self::Distance => (0.0..=1.0).contains(&weight),
        }
    }
}

impl fmt::Display for WeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a single edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeClass {
    /// The edge passes the cutoff.
    Accept,
    /// The edge is valid but excluded by the cutoff.
    Reject,
    /// The weight lies outside the valid range of its weight type.
    Invalid,
}

/// Classify `weight` against `cutoff` under `weight_type`.
///
/// NaN weights are [`EdgeClass::Invalid`] for both weight types.
///
/// # Examples
/// ```
/// use netclust_core::{EdgeClass, WeightType, classify};
///
/// assert_eq!(classify(0.9, WeightType::Similarity, 0.5), EdgeClass::Accept);
/// assert_eq!(classify(0.1, WeightType::Similarity, 0.5), EdgeClass::Reject);
/// assert_eq!(classify(1.5, WeightType::Distance, 1.0), EdgeClass::Invalid);
/// ```
#[must_use]
pub fn classify(weight: f32, weight_type: WeightType, cutoff: f32) -> EdgeClass {
    if !weight_type.is_valid_weight(weight) {
        return EdgeClass::Invalid;
    }
    let rejected = match weight_type {
        WeightType::Similarity => weight < cutoff,
        WeightType::Distance => weight > cutoff,
    };
    if rejected {
        EdgeClass::Reject
    } else {
        EdgeClass::Accept
    }
}

/// A validated weight type and cutoff pair.
///
/// # Examples
/// ```
/// use netclust_core::{EdgeClass, EdgeFilter, WeightType};
///
/// let filter = EdgeFilter::new(WeightType::Distance, 0.3).expect("cutoff is in range");
/// assert_eq!(filter.classify(0.2), EdgeClass::Accept);
/// assert_eq!(filter.classify(0.4), EdgeClass::Reject);
/// assert!(EdgeFilter::new(WeightType::Distance, 1.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFilter {
    weight_type: WeightType,
    cutoff: f32,
}

impl EdgeFilter {
    /// Builds a filter, rejecting cutoffs outside the weight type's range.
    ///
    /// # Errors
    /// Returns [`NetclustError::InvalidCutoff`] when `cutoff` is not finite,
    /// is negative, or exceeds `1` for distance weights.
    pub fn new(weight_type: WeightType, cutoff: f32) -> Result<Self> {
        if !cutoff.is_finite() || !weight_type.is_valid_weight(cutoff) {
            return Err(NetclustError::InvalidCutoff {
                weight_type,
                cutoff,
            });
        }
        Ok(Self {
            weight_type,
            cutoff,
        })
    }

    /// Builds a filter with [`WeightType::default_cutoff`].
    #[must_use]
    pub const fn with_default_cutoff(weight_type: WeightType) -> Self {
        Self {
            weight_type,
            cutoff: weight_type.default_cutoff(),
        }
    }

    /// Weight semantic of this filter.
    #[must_use]
    pub const fn weight_type(&self) -> WeightType {
        self.weight_type
    }

    /// Cutoff of this filter.
    #[must_use]
    pub const fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Classify `weight` with this filter's settings.
    #[must_use]
    pub fn classify(&self, weight: f32) -> EdgeClass {
        classify(weight, self.weight_type, self.cutoff)
    }
}

impl Default for EdgeFilter {
    fn default() -> Self {
        Self::with_default_cutoff(WeightType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::similarity_above(0.9, WeightType::Similarity, 0.5, EdgeClass::Accept)]
    #[case::similarity_at_cutoff(0.5, WeightType::Similarity, 0.5, EdgeClass::Accept)]
    #[case::similarity_below(0.1, WeightType::Similarity, 0.5, EdgeClass::Reject)]
    #[case::similarity_unbounded(250.0, WeightType::Similarity, 0.0, EdgeClass::Accept)]
    #[case::similarity_negative(-0.1, WeightType::Similarity, 0.0, EdgeClass::Invalid)]
    #[case::distance_below(0.2, WeightType::Distance, 0.3, EdgeClass::Accept)]
    #[case::distance_at_cutoff(0.3, WeightType::Distance, 0.3, EdgeClass::Accept)]
    #[case::distance_above(0.4, WeightType::Distance, 0.3, EdgeClass::Reject)]
    #[case::distance_over_one(1.5, WeightType::Distance, 1.0, EdgeClass::Invalid)]
    #[case::distance_over_one_tight_cutoff(1.5, WeightType::Distance, 0.1, EdgeClass::Invalid)]
    #[case::distance_negative(-0.5, WeightType::Distance, 1.0, EdgeClass::Invalid)]
    #[case::nan_similarity(f32::NAN, WeightType::Similarity, 0.0, EdgeClass::Invalid)]
    #[case::nan_distance(f32::NAN, WeightType::Distance, 1.0, EdgeClass::Invalid)]
    fn classify_matches_weight_semantics(
        #[case] weight: f32,
        #[case] weight_type: WeightType,
        #[case] cutoff: f32,
        #[case] expected: EdgeClass,
    ) {
        assert_eq!(classify(weight, weight_type, cutoff), expected);
    }

    #[rstest]
    #[case(WeightType::Similarity, -1.0)]
    #[case(WeightType::Similarity, f32::INFINITY)]
    #[case(WeightType::Distance, 1.01)]
    #[case(WeightType::Distance, -0.01)]
    #[case(WeightType::Distance, f32::NAN)]
    fn filter_rejects_out_of_range_cutoffs(#[case] weight_type: WeightType, #[case] cutoff: f32) {
        let err = EdgeFilter::new(weight_type, cutoff).expect_err("cutoff must be rejected");
        assert!(matches!(err, NetclustError::InvalidCutoff { .. }));
    }

    #[rstest]
    #[case(WeightType::Similarity, 0.0)]
    #[case(WeightType::Distance, 1.0)]
    fn default_cutoff_keeps_every_valid_edge(#[case] weight_type: WeightType, #[case] cutoff: f32) {
        let filter = EdgeFilter::with_default_cutoff(weight_type);
        assert_eq!(filter.cutoff(), cutoff);
        assert_eq!(filter.classify(0.0), EdgeClass::Accept);
        assert_eq!(filter.classify(1.0), EdgeClass::Accept);
    }
}
