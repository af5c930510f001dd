//! Tambon - Thai Address Lookup Library
//!
//! Tambon answers the questions an address form asks about Thailand's
//! administrative hierarchy: which districts belong to a province, which
//! sub-districts a postal code serves, whether a submitted address exists, and
//! what the user most likely means while they are still typing.
//!
//! # Quick Start
//!
//! ```rust
//! use tambon::{AddressBook, AutocompleteQuery, SearchCriteria};
//!
//! // Create a book over the gazetteer compiled into the binary
//! let book = AddressBook::new_embedded()?;
//!
//! // Structured search: every given field must match
//! let results = book.search_addresses(&SearchCriteria::new().province("ภูเก็ต").district("กะทู้"));
//! assert!(results.iter().all(|r| r.district == "กะทู้"));
//!
//! // Autocomplete while the user types
//! let suggestions = book.autocomplete(AutocompleteQuery::new("เชียง").with_limit(5));
//! assert!(suggestions.len() <= 5);
//!
//! // Validate a submitted address
//! if let Some(first) = results.first() {
//!     assert!(book.validate_address(first));
//! }
//! # Ok::<(), tambon::error::TambonError>(())
//! ```
//!
//! # Matching
//!
//! All name comparisons go through [`normalize_text`]: surrounding and inner
//! whitespace is ignored and Latin letters are case-folded. Postal codes are
//! compared as literal strings.
//!
//! # Data
//!
//! The crate ships a sample gazetteer so it works out of the box. Point
//! [`DataSource::File`], [`DataSource::Discover`] or the `TAMBON_DATA_FILE` /
//! `TAMBON_DATA_URL` environment variables at a complete `geography.json` for
//! national coverage.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
mod index;
mod normalize;
mod search;
mod validate;

pub use crate::core::{AddressBook, AddressBookBuilder, AddressBookInfo};

pub use config::{LookupConfigBuilder, ScoringBuilder};
pub use index::{NormalizedFields, RecordIndex};
pub use normalize::normalize_text;
pub use search::{
    AutocompleteQuery, DEFAULT_AUTOCOMPLETE_LIMIT, FieldWeights, LookupConfig, ScoreWeights,
    SearchCriteria,
};
pub use tambon_data as data;
pub use tambon_data::{AddressData, AddressRecord, DataSource, Dataset};
pub use validate::{validate_postal_code, validate_postal_code_value};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Tambon library.
///
/// This sets up structured logging with configurable levels and filtering.
/// `RUST_LOG` takes precedence over `level` when set. Calling it again is a no-op.
///
/// # Examples
///
/// ```rust
/// use tambon::init_logging;
/// use tracing::Level;
///
/// // Initialize with info-level logging
/// init_logging(Level::INFO)?;
/// # Ok::<(), tambon::error::TambonError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::TambonError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("reqwest=warn".parse()?)
            .add_directive("hyper_util=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_book_creation() {
        setup_test_env();

        let book = AddressBook::new_embedded();
        assert!(book.is_ok(), "Should be able to create a book from embedded data");
        assert!(!book.unwrap().is_empty());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        setup_test_env();
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_basic_lookup() {
        setup_test_env();

        let book = AddressBook::new_embedded().unwrap();
        let results = book.find_by_province("กรุงเทพมหานคร");
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.province == "กรุงเทพมหานคร"));
    }

    #[test]
    fn test_configuration() {
        setup_test_env();

        let config = LookupConfigBuilder::compact().build();
        assert_eq!(config.limit, 5);

        let book = AddressBook::new_embedded().unwrap().with_config(config);
        let results = book.autocomplete("กรุงเทพมหานคร");
        assert_eq!(results.len(), 5, "Should respect limit in configuration");
    }

    #[test]
    fn test_empty_queries() {
        setup_test_env();

        let book = AddressBook::new_embedded().unwrap();
        assert!(book.autocomplete("").is_empty());
        assert!(book.search_addresses(&SearchCriteria::new()).is_empty());
        assert!(book.find_by_district("   ", None).is_empty());
        assert!(book.autocomplete("XYZ123NONEXISTENT").is_empty());
    }
}
