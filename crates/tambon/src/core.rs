//! The [`AddressBook`] facade.
//!
//! An `AddressBook` binds one loaded gazetteer to the lookup, autocomplete,
//! validation and listing operations. Loading is the only step that can fail;
//! once built, every query is infallible and the book can be shared freely
//! across threads.
//!
//! # Quick Start
//!
//! ```rust
//! use tambon::{AddressBook, SearchCriteria};
//!
//! let book = AddressBook::new_embedded()?;
//!
//! let in_pathum_wan = book.search_addresses(&SearchCriteria::new().district("ปทุมวัน"));
//! assert!(!in_pathum_wan.is_empty());
//!
//! let suggestions = book.autocomplete("เชียงใหม่");
//! assert_eq!(suggestions[0].province, "เชียงใหม่");
//! # Ok::<(), tambon::error::TambonError>(())
//! ```

use serde_json::Value;
use tambon_data::{
    AddressData, AddressRecord, DataSource, Dataset, embedded::EmbeddedMetadata, embedded::METADATA,
    load_dataset,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::TambonError,
    index::RecordIndex,
    search::{
        AutocompleteQuery, LookupConfig, SearchCriteria, autocomplete_bulk_inner,
        autocomplete_inner, find_by_district_inner, find_by_postal_code_inner,
        find_by_province_inner, list_districts_inner, list_postal_codes_inner,
        list_provinces_inner, list_sub_districts_inner, search_addresses_inner,
    },
    validate::{
        is_valid_district_inner, is_valid_province_inner, is_valid_sub_district_inner,
        validate_address_inner, validate_address_value_inner, validate_postal_code,
    },
};

/// Lookups over one immutable gazetteer.
///
/// Cloning is cheap: clones share the records and their normalized index.
///
/// # Examples
///
/// With custom configuration:
/// ```rust
/// use tambon::{AddressBook, LookupConfig};
///
/// let config = LookupConfig::builder().limit(3).build();
/// let book = AddressBook::new_embedded()?.with_config(config);
/// assert!(book.autocomplete("กรุงเทพ").len() <= 3);
/// # Ok::<(), tambon::error::TambonError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AddressBook {
    index: RecordIndex,
    config: LookupConfig,
    source: Option<DataSource>,
}

impl AddressBook {
    /// Wrap an already loaded dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            index: RecordIndex::new(dataset),
            config: LookupConfig::default(),
            source: None,
        }
    }

    /// Load the gazetteer from `source` and index it.
    #[instrument(name = "Create AddressBook", skip_all, fields(source = source.name()), level = "info")]
    pub fn from_source(source: DataSource) -> Result<Self, TambonError> {
        let t_init = std::time::Instant::now();
        let dataset = load_dataset(&source)?;
        let mut book = Self::new(dataset);
        book.source = Some(source);
        info!(
            records = book.len(),
            elapsed = ?t_init.elapsed(),
            "AddressBook ready"
        );
        Ok(book)
    }

    /// Use the gazetteer compiled into the binary.
    pub fn new_embedded() -> Result<Self, TambonError> {
        Self::from_source(DataSource::Embedded)
    }

    /// Pick the source from `TAMBON_DATA_URL` / `TAMBON_DATA_FILE`, else embedded.
    pub fn from_env() -> Result<Self, TambonError> {
        Self::from_source(DataSource::from_env())
    }

    /// Build over a memoized handle; repeated calls share one loaded dataset.
    pub fn from_data(data: &AddressData) -> Result<Self, TambonError> {
        let mut book = Self::new(data.dataset()?.clone());
        book.source = Some(data.source().clone());
        Ok(book)
    }

    pub fn builder() -> AddressBookBuilder {
        AddressBookBuilder::new()
    }

    /// Replace the lookup configuration.
    pub fn with_config(mut self, config: LookupConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        self.index.dataset()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn info(&self) -> AddressBookInfo {
        AddressBookInfo {
            source: self.source.clone(),
            records: self.len(),
            provinces: list_provinces_inner(&self.index).len(),
            embedded_metadata: METADATA,
        }
    }

    // === Structured search ===

    /// Records matching every set field of `criteria`, in dataset order.
    ///
    /// Name fields match by normalized substring, the postal code exactly.
    /// Criteria with no usable field return nothing.
    pub fn search_addresses(&self, criteria: &SearchCriteria) -> Vec<AddressRecord> {
        search_addresses_inner(&self.index, criteria)
    }

    pub fn find_by_postal_code(&self, postal_code: &str) -> Vec<AddressRecord> {
        find_by_postal_code_inner(&self.index, postal_code)
    }

    pub fn find_by_province(&self, province: &str) -> Vec<AddressRecord> {
        find_by_province_inner(&self.index, province)
    }

    pub fn find_by_district(&self, district: &str, province: Option<&str>) -> Vec<AddressRecord> {
        find_by_district_inner(&self.index, district, province)
    }

    // === Autocomplete ===

    /// Ranked suggestions for free text, best first.
    ///
    /// ```rust
    /// # use tambon::{AddressBook, AutocompleteQuery};
    /// # let book = AddressBook::new_embedded().unwrap();
    /// let by_code = book.autocomplete("10330");
    /// assert!(by_code.iter().all(|r| r.postal_code == "10330"));
    ///
    /// let top_two = book.autocomplete(AutocompleteQuery::new("ภูเก็ต").with_limit(2));
    /// assert_eq!(top_two.len(), 2);
    /// ```
    pub fn autocomplete(&self, query: impl Into<AutocompleteQuery>) -> Vec<AddressRecord> {
        self.autocomplete_with_config(&query.into(), &self.config)
    }

    pub fn autocomplete_with_config(
        &self,
        query: &AutocompleteQuery,
        config: &LookupConfig,
    ) -> Vec<AddressRecord> {
        let results = autocomplete_inner(&self.index, query, config);
        debug!(query = %query.query, results = results.len(), "Autocomplete");
        results
    }

    /// Many independent autocomplete queries, evaluated in parallel.
    pub fn autocomplete_bulk(&self, queries: &[AutocompleteQuery]) -> Vec<Vec<AddressRecord>> {
        autocomplete_bulk_inner(&self.index, queries, &self.config)
    }

    // === Validation ===

    /// Shape check only. Same as the free function [`crate::validate_postal_code`].
    pub fn validate_postal_code(&self, postal_code: &str) -> bool {
        validate_postal_code(postal_code)
    }

    pub fn is_valid_province(&self, province: &str) -> bool {
        is_valid_province_inner(&self.index, province)
    }

    pub fn is_valid_district(&self, district: &str, province: Option<&str>) -> bool {
        is_valid_district_inner(&self.index, district, province)
    }

    pub fn is_valid_sub_district(
        &self,
        sub_district: &str,
        district: Option<&str>,
        province: Option<&str>,
    ) -> bool {
        is_valid_sub_district_inner(&self.index, sub_district, district, province)
    }

    /// True iff the gazetteer holds this exact combination of names and postal code.
    pub fn validate_address(&self, address: &AddressRecord) -> bool {
        validate_address_inner(&self.index, address)
    }

    /// Like [`Self::validate_address`] for untyped JSON input.
    ///
    /// ```rust
    /// # use tambon::AddressBook;
    /// # let book = AddressBook::new_embedded().unwrap();
    /// let form = serde_json::json!({
    ///     "province": "กรุงเทพมหานคร",
    ///     "district": "ปทุมวัน",
    ///     "subDistrict": "ลุมพินี",
    ///     "postalCode": "10330",
    /// });
    /// assert!(book.validate_address_value(&form));
    /// assert!(!book.validate_address_value(&serde_json::Value::Null));
    /// ```
    pub fn validate_address_value(&self, value: &Value) -> bool {
        validate_address_value_inner(&self.index, value)
    }

    // === Listings ===

    pub fn list_provinces(&self) -> Vec<String> {
        list_provinces_inner(&self.index)
    }

    pub fn list_districts(&self, province: &str) -> Vec<String> {
        list_districts_inner(&self.index, province)
    }

    pub fn list_sub_districts(&self, district: &str, province: &str) -> Vec<String> {
        list_sub_districts_inner(&self.index, district, province)
    }

    pub fn list_postal_codes(&self, sub_district: &str, district: &str, province: &str) -> Vec<String> {
        list_postal_codes_inner(&self.index, sub_district, district, province)
    }
}

impl From<Dataset> for AddressBook {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

/// Information about an `AddressBook`'s data.
#[derive(Debug, Clone)]
pub struct AddressBookInfo {
    /// `None` when the book was built directly from a [`Dataset`]
    pub source: Option<DataSource>,
    pub records: usize,
    pub provinces: usize,
    pub embedded_metadata: EmbeddedMetadata,
}

impl AddressBookInfo {
    /// Get a human-readable summary of the book.
    pub fn summary(&self) -> String {
        let source = self.source.as_ref().map_or("dataset", DataSource::name);
        format!(
            "AddressBook using {source} data with {} records across {} provinces",
            self.records, self.provinces
        )
    }

    pub fn is_embedded(&self) -> bool {
        self.source == Some(DataSource::Embedded)
    }
}

// === Builder Pattern ===

/// Builder for creating an `AddressBook` with custom configuration.
#[derive(Debug, Clone)]
pub struct AddressBookBuilder {
    data_source: Option<DataSource>,
    config: LookupConfig,
    embedded_fallback: bool,
}

impl AddressBookBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_source: None,
            config: LookupConfig::default(),
            embedded_fallback: false,
        }
    }

    /// Set the data source.
    #[must_use]
    pub fn data_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }

    #[must_use]
    pub fn config(mut self, config: LookupConfig) -> Self {
        self.config = config;
        self
    }

    /// Fall back to the embedded gazetteer when the chosen source fails to load.
    #[must_use]
    pub fn embedded_fallback(mut self, fallback: bool) -> Self {
        self.embedded_fallback = fallback;
        self
    }

    /// Build the `AddressBook`.
    pub fn build(self) -> Result<AddressBook, TambonError> {
        let data_source = self.data_source.unwrap_or_default();
        let book = match AddressBook::from_source(data_source) {
            Ok(book) => book,
            Err(e) if self.embedded_fallback => {
                warn!(error = %e, "Falling back to embedded gazetteer");
                AddressBook::new_embedded()?
            }
            Err(e) => return Err(e),
        };
        Ok(book.with_config(self.config))
    }
}

impl Default for AddressBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tambon_data::{TestDataConfig, create_test_data, test_records};

    use super::*;

    fn sample_book() -> AddressBook {
        AddressBook::new(Dataset::new(test_records(&TestDataConfig::sample())))
    }

    #[test]
    fn test_empty_dataset_yields_empty_results() {
        let book = AddressBook::new(Dataset::default());
        assert!(book.is_empty());
        assert!(book.autocomplete("กรุงเทพ").is_empty());
        assert!(book.find_by_postal_code("10330").is_empty());
        assert!(book.list_provinces().is_empty());
        assert!(!book.is_valid_province("กรุงเทพมหานคร"));
        // Shape checks do not depend on the data.
        assert!(book.validate_postal_code("10330"));
    }

    #[test]
    fn test_from_file_source() {
        let file = create_test_data(&TestDataConfig::sample()).unwrap();
        let book = AddressBook::from_source(DataSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(book.dataset().records(), sample_book().dataset().records());
        assert_eq!(book.info().source.map(|s| s.name()), Some("file"));
    }

    #[test]
    fn test_from_source_surfaces_load_errors() {
        let result = AddressBook::from_source(DataSource::File("/no/such/geography.json".into()));
        assert!(matches!(result, Err(TambonError::DataError(_))));
    }

    #[test]
    fn test_from_data_shares_dataset() {
        let data = AddressData::new(DataSource::Records(test_records(
            &TestDataConfig::minimal(),
        )));
        let first = AddressBook::from_data(&data).unwrap();
        let second = AddressBook::from_data(&data).unwrap();
        assert!(first.dataset().ptr_eq(second.dataset()));
    }

    #[test]
    fn test_builder_falls_back_to_embedded() {
        let missing = DataSource::File("/no/such/geography.json".into());

        let strict = AddressBook::builder().data_source(missing.clone()).build();
        assert!(strict.is_err());

        let book = AddressBook::builder()
            .data_source(missing)
            .embedded_fallback(true)
            .config(LookupConfig::builder().limit(2).build())
            .build()
            .unwrap();
        assert!(book.info().is_embedded());
        assert_eq!(book.config().limit, 2);
        assert!(book.autocomplete("กรุงเทพมหานคร").len() <= 2);
    }

    #[test]
    fn test_info_summary() {
        let info = sample_book().info();
        assert_eq!(info.records, 14);
        assert_eq!(info.provinces, 6);
        assert!(!info.is_embedded());
        assert_eq!(
            info.summary(),
            "AddressBook using dataset data with 14 records across 6 provinces"
        );
    }

    #[test]
    fn test_autocomplete_accepts_query_forms() {
        let book = sample_book();
        let from_str = book.autocomplete("ภูเก็ต");
        let from_query = book.autocomplete(AutocompleteQuery::new("ภูเก็ต"));
        let from_string = book.autocomplete(String::from("ภูเก็ต"));
        assert_eq!(from_str, from_query);
        assert_eq!(from_str, from_string);
    }

    #[test]
    fn test_book_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AddressBook>();
    }
}
