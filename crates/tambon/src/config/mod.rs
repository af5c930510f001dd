use crate::{
    error::TambonError,
    search::{FieldWeights, LookupConfig, ScoreWeights},
};

/// Builder for creating lookup configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct LookupConfigBuilder {
    config: LookupConfig,
}

impl LookupConfigBuilder {
    /// Create a new builder with the default limit and bonus table
    pub fn new() -> Self {
        Self {
            config: LookupConfig::default(),
        }
    }

    /// Create a builder for dropdowns with little room (5 suggestions)
    pub fn compact() -> Self {
        Self::new().limit(5)
    }

    /// Create a builder for result pages that show many suggestions (50)
    pub fn exhaustive() -> Self {
        Self::new().limit(50)
    }

    /// Set the default number of autocomplete suggestions
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Configure autocomplete scoring weights
    pub fn scoring(self) -> ScoringBuilder {
        ScoringBuilder::new(self)
    }

    /// Build the final configuration
    pub fn build(self) -> LookupConfig {
        self.config
    }
}

/// Builder for autocomplete scoring weights
#[derive(Debug, Clone)]
pub struct ScoringBuilder {
    parent: LookupConfigBuilder,
}

impl ScoringBuilder {
    fn new(parent: LookupConfigBuilder) -> Self {
        Self { parent }
    }

    /// Let a postal code hit outrank any single name match
    pub fn prioritize_postal_code(mut self) -> Self {
        self.parent.config.weights.postal_code = 200;
        self
    }

    /// Rank the most specific level first: sub-district, then district, then province
    pub fn prioritize_sub_district(mut self) -> Self {
        let weights = &mut self.parent.config.weights;
        weights.province = FieldWeights::new(60, 30, 10);
        weights.district = FieldWeights::new(80, 40, 15);
        weights.sub_district = FieldWeights::new(100, 50, 20);
        self
    }

    /// Set custom weights (each field needs equals > starts_with > contains > 0)
    pub fn custom_weights(
        mut self,
        province: FieldWeights,
        district: FieldWeights,
        sub_district: FieldWeights,
        postal_code: u32,
    ) -> Result<Self, TambonError> {
        let weights = ScoreWeights {
            province,
            district,
            sub_district,
            postal_code,
        };
        weights.validate().map_err(TambonError::ConfigError)?;

        self.parent.config.weights = weights;
        Ok(self)
    }

    /// Return to the main configuration builder
    pub fn done(self) -> LookupConfigBuilder {
        self.parent
    }
}
