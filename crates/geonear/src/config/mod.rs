use crate::geohash::FULL_PRECISION;

/// Configuration for radius search operations.
///
/// Use [`SearchConfigBuilder`] for an ergonomic way to create
/// configurations with sensible defaults.
///
/// # Examples
///
/// ```rust
/// use geonear::SearchConfig;
///
/// let config = SearchConfig::builder().buffer_factor(1.02).build();
/// assert!(config.precision.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Multiplier applied to the query radius before distance filtering.
    /// Slightly above 1 so points at the circle's edge survive
    /// floating-point and cell-boundary rounding.
    pub buffer_factor: f64,
    /// Fixed geohash precision for the cell queries. When unset, the
    /// precision is derived from the query radius.
    pub precision: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            buffer_factor: 1.01,
            precision: None,
        }
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for creating search configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with sensible defaults
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Create a builder for exact-radius searches (no edge tolerance)
    pub fn strict() -> Self {
        let mut builder = Self::new();
        builder.config.buffer_factor = 1.0;
        builder
    }

    /// Create a builder that favors recall near the circle's edge
    pub fn wide_net() -> Self {
        let mut builder = Self::new();
        builder.config.buffer_factor = 1.05;
        builder
    }

    /// Set the radius multiplier used during distance filtering (≥ 1.0)
    pub fn buffer_factor(mut self, factor: f64) -> Self {
        self.config.buffer_factor = factor.max(1.0);
        self
    }

    /// Pin the cell precision instead of deriving it from the radius
    pub fn precision(mut self, chars: usize) -> Self {
        self.config.precision = Some(chars.clamp(1, FULL_PRECISION));
        self
    }

    /// Derive the cell precision from the query radius (the default)
    pub fn radius_derived_precision(mut self) -> Self {
        self.config.precision = None;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
