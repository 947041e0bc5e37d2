//! Builders for the indexing and clustering pipelines.
//!
//! Both builders validate their settings in `build`, so a constructed
//! [`Indexer`] or [`Clusterer`] never touches a file with a bad cutoff.

use std::num::{NonZeroU32, NonZeroUsize};

use crate::{
    Result,
    clusterer::Clusterer,
    error::NetclustError,
    filter::{EdgeFilter, WeightType},
    format::{DEFAULT_LABEL_WIDTH, HeaderLayout},
    indexer::Indexer,
};

/// Initial interner capacity when none is configured.
pub const DEFAULT_INTERNER_CAPACITY: usize = 1024;

fn edge_filter(weight_type: WeightType, cutoff: Option<f32>) -> Result<EdgeFilter> {
    EdgeFilter::new(
        weight_type,
        cutoff.unwrap_or_else(|| weight_type.default_cutoff()),
    )
}

/// Configures and constructs [`Indexer`] instances.
///
/// # Examples
/// ```
/// use netclust_core::{HeaderLayout, IndexerBuilder, WeightType};
///
/// let indexer = IndexerBuilder::new()
///     .with_weight_type(WeightType::Distance)
///     .with_cutoff(0.25)
///     .with_label_width(16)
///     .with_header_layout(HeaderLayout::Buffered)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(indexer.filter().cutoff(), 0.25);
/// assert_eq!(indexer.label_width().get(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct IndexerBuilder {
    weight_type: WeightType,
    cutoff: Option<f32>,
    label_width: u32,
    interner_capacity: usize,
    header_layout: HeaderLayout,
}

impl Default for IndexerBuilder {
    fn default() -> Self {
        Self {
            weight_type: WeightType::default(),
            cutoff: None,
            label_width: DEFAULT_LABEL_WIDTH,
            interner_capacity: DEFAULT_INTERNER_CAPACITY,
            header_layout: HeaderLayout::default(),
        }
    }
}

impl IndexerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use netclust_core::{IndexerBuilder, WeightType};
    ///
    /// let builder = IndexerBuilder::new();
    /// assert_eq!(builder.weight_type(), WeightType::Similarity);
    /// assert_eq!(builder.cutoff(), None);
    /// assert_eq!(builder.label_width(), 30);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the meaning of edge weights.
    #[must_use]
    pub fn with_weight_type(mut self, weight_type: WeightType) -> Self {
        self.weight_type = weight_type;
        self
    }

    /// Returns the configured weight type.
    #[must_use]
    pub fn weight_type(&self) -> WeightType {
        self.weight_type
    }

    /// Sets the cutoff. Without one the weight type's default applies.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Returns the explicitly configured cutoff, if any.
    #[must_use]
    pub fn cutoff(&self) -> Option<f32> {
        self.cutoff
    }

    /// Sets the fixed record width for node labels, in bytes.
    #[must_use]
    pub fn with_label_width(mut self, width: u32) -> Self {
        self.label_width = width;
        self
    }

    /// Returns the configured label width.
    #[must_use]
    pub fn label_width(&self) -> u32 {
        self.label_width
    }

    /// Sets the number of labels the interner reserves room for up front.
    #[must_use]
    pub fn with_interner_capacity(mut self, capacity: usize) -> Self {
        self.interner_capacity = capacity;
        self
    }

    /// Returns the configured interner capacity.
    #[must_use]
    pub fn interner_capacity(&self) -> usize {
        self.interner_capacity
    }

    /// Chooses how index headers are written.
    #[must_use]
    pub fn with_header_layout(mut self, layout: HeaderLayout) -> Self {
        self.header_layout = layout;
        self
    }

    /// Returns the configured header layout.
    #[must_use]
    pub fn header_layout(&self) -> HeaderLayout {
        self.header_layout
    }

    /// Validates the configuration and constructs an [`Indexer`].
    ///
    /// # Errors
    /// Returns [`NetclustError::InvalidCutoff`] for a cutoff outside the
    /// weight type's range, [`NetclustError::InvalidLabelWidth`] for a zero
    /// width and [`NetclustError::ZeroInternerCapacity`] for a zero capacity.
    ///
    /// # Examples
    /// ```
    /// use netclust_core::{IndexerBuilder, NetclustErrorCode, WeightType};
    ///
    /// let err = IndexerBuilder::new()
    ///     .with_weight_type(WeightType::Distance)
    ///     .with_cutoff(1.5)
    ///     .build()
    ///     .expect_err("distance cutoffs stop at 1");
    /// assert_eq!(err.code(), NetclustErrorCode::InvalidCutoff);
    /// ```
    pub fn build(self) -> Result<Indexer> {
        let filter = edge_filter(self.weight_type, self.cutoff)?;
        let label_width = NonZeroU32::new(self.label_width).ok_or(
            NetclustError::InvalidLabelWidth {
                width: self.label_width,
            },
        )?;
        let interner_capacity =
            NonZeroUsize::new(self.interner_capacity).ok_or(NetclustError::ZeroInternerCapacity)?;
        Ok(Indexer::new(
            filter,
            label_width,
            interner_capacity,
            self.header_layout,
        ))
    }
}

/// Configures and constructs [`Clusterer`] instances.
///
/// # Examples
/// ```
/// use netclust_core::{ClustererBuilder, WeightType};
///
/// let clusterer = ClustererBuilder::new()
///     .with_weight_type(WeightType::Distance)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(clusterer.filter().cutoff(), 1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClustererBuilder {
    weight_type: WeightType,
    cutoff: Option<f32>,
}

impl ClustererBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the meaning of edge weights.
    #[must_use]
    pub fn with_weight_type(mut self, weight_type: WeightType) -> Self {
        self.weight_type = weight_type;
        self
    }

    /// Returns the configured weight type.
    #[must_use]
    pub fn weight_type(&self) -> WeightType {
        self.weight_type
    }

    /// Sets the cutoff applied to every edge record.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Returns the explicitly configured cutoff, if any.
    #[must_use]
    pub fn cutoff(&self) -> Option<f32> {
        self.cutoff
    }

    /// Validates the configuration and constructs a [`Clusterer`].
    ///
    /// # Errors
    /// Returns [`NetclustError::InvalidCutoff`] for a cutoff outside the
    /// weight type's range.
    pub fn build(self) -> Result<Clusterer> {
        Ok(Clusterer::new(edge_filter(self.weight_type, self.cutoff)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(WeightType::Similarity, 0.0)]
    #[case(WeightType::Distance, 1.0)]
    fn missing_cutoff_uses_weight_type_default(
        #[case] weight_type: WeightType,
        #[case] expected: f32,
    ) {
        let indexer = IndexerBuilder::new()
            .with_weight_type(weight_type)
            .build()
            .expect("defaults are valid");
        assert_eq!(indexer.filter().cutoff(), expected);
        let clusterer = ClustererBuilder::new()
            .with_weight_type(weight_type)
            .build()
            .expect("defaults are valid");
        assert_eq!(clusterer.filter().cutoff(), expected);
    }

    #[rstest]
    fn zero_label_width_is_rejected() {
        let err = IndexerBuilder::new()
            .with_label_width(0)
            .build()
            .expect_err("zero width must fail");
        assert!(matches!(err, NetclustError::InvalidLabelWidth { width: 0 }));
    }

    #[rstest]
    fn zero_interner_capacity_is_rejected() {
        let err = IndexerBuilder::new()
            .with_interner_capacity(0)
            .build()
            .expect_err("zero capacity must fail");
        assert!(matches!(err, NetclustError::ZeroInternerCapacity));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f32::NAN)]
    fn negative_or_nan_cutoffs_are_rejected(#[case] cutoff: f32) {
        let err = ClustererBuilder::new()
            .with_cutoff(cutoff)
            .build()
            .expect_err("cutoff must fail");
        assert!(matches!(err, NetclustError::InvalidCutoff { .. }));
    }
}
