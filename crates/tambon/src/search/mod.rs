//! In-memory lookups over a loaded gazetteer.
//!
//! Every operation here is a linear scan over a [`RecordIndex`] and never fails:
//! blank or unknown input simply produces an empty result. The public entry
//! points live on [`crate::AddressBook`]; the `*_inner` functions are the
//! implementations it delegates to.

mod autocomplete;
mod filter;
mod listing;

pub use autocomplete::{
    AutocompleteQuery, FieldWeights, ScoreWeights, autocomplete_bulk_inner, autocomplete_inner,
};
pub use filter::{
    SearchCriteria, find_by_district_inner, find_by_postal_code_inner, find_by_province_inner,
    search_addresses_inner,
};
pub use listing::{
    list_districts_inner, list_postal_codes_inner, list_provinces_inner, list_sub_districts_inner,
};

/// Number of autocomplete suggestions returned when a query sets no limit.
pub const DEFAULT_AUTOCOMPLETE_LIMIT: usize = 10;

/// Tunables for lookups that rank results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupConfig {
    /// Autocomplete limit used when the query carries none
    pub limit: usize,
    /// Bonus table for autocomplete scoring
    pub weights: ScoreWeights,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_AUTOCOMPLETE_LIMIT,
            weights: ScoreWeights::default(),
        }
    }
}

impl LookupConfig {
    pub fn builder() -> crate::LookupConfigBuilder {
        crate::LookupConfigBuilder::new()
    }
}
