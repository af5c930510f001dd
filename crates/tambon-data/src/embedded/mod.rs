use super::error::Result;
use crate::{AddressRecord, parse_geography};

// Bundled gazetteer in the raw `geography.json` format.
const EMBEDDED_GEOGRAPHY: &str = include_str!("geography.json");

/// Describes the gazetteer compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedMetadata {
    pub version: &'static str,
    pub source: &'static str,
    pub description: &'static str,
}

pub const METADATA: EmbeddedMetadata = EmbeddedMetadata {
    version: "1.0.0",
    source: "geography.json",
    description: "Bundled sample of Thai provinces, districts, sub-districts and postal codes",
};

/// Load the gazetteer that ships with the library.
///
/// This covers Bangkok, Chiang Mai, Phuket, Nonthaburi, Pathum Thani,
/// Saraburi and Nakhon Ratchasima. Point [`crate::DataSource::File`] or
/// [`crate::DataSource::Discover`] at a full `geography.json` for national coverage.
pub fn load_embedded_records() -> Result<Vec<AddressRecord>> {
    tracing::debug!(
        version = METADATA.version,
        bytes = EMBEDDED_GEOGRAPHY.len(),
        "Loading embedded gazetteer"
    );
    parse_geography(EMBEDDED_GEOGRAPHY.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_records() {
        let records = load_embedded_records().expect("Should load embedded gazetteer");
        assert!(!records.is_empty(), "Embedded gazetteer should not be empty");
        assert!(records.iter().all(|r| r.check().is_ok()));
    }

    #[test]
    fn test_embedded_records_cover_known_provinces() {
        let records = load_embedded_records().unwrap();
        for province in ["กรุงเทพมหานคร", "เชียงใหม่", "ภูเก็ต"] {
            assert!(
                records.iter().any(|r| r.province == province),
                "Missing province {province}"
            );
        }
    }

    #[test]
    fn test_embedded_metadata() {
        assert_eq!(METADATA.version, "1.0.0");
        assert_eq!(METADATA.source, "geography.json");
    }
}
