use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use super::error::{DataError, Result};

/// One row of the gazetteer: a sub-district and the postal code that serves it.
///
/// Field names serialize in camelCase (`subDistrict`, `postalCode`), matching
/// the shape address forms usually submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    /// Province (changwat) display name
    pub province: String,
    /// District (amphoe / khet) display name, unique only within its province
    pub district: String,
    /// Sub-district (tambon / khwaeng) display name, unique only within its district
    pub sub_district: String,
    /// Five ASCII digits, kept as text so leading zeros survive
    pub postal_code: String,
}

impl AddressRecord {
    pub fn new(
        province: impl Into<String>,
        district: impl Into<String>,
        sub_district: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            district: district.into(),
            sub_district: sub_district.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Checks the invariants every loaded gazetteer row must hold.
    ///
    /// Returns a human-readable reason for the first violated invariant.
    pub fn check(&self) -> std::result::Result<(), String> {
        for (field, value) in [
            ("province", &self.province),
            ("district", &self.district),
            ("subDistrict", &self.sub_district),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} is empty"));
            }
        }
        if !is_postal_code_shape(&self.postal_code) {
            return Err(format!(
                "postalCode {:?} is not exactly 5 ASCII digits",
                self.postal_code
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.sub_district, self.district, self.province, self.postal_code
        )
    }
}

fn is_postal_code_shape(code: &str) -> bool {
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Postal codes appear in published gazetteers both as JSON numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostalCodeValue {
    Number(u32),
    Text(String),
}

impl PostalCodeValue {
    /// Renders the code as text. Numbers are zero-padded to five digits.
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) => format!("{n:05}"),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// One item of the raw gazetteer file.
///
/// Only the Thai display names and the postal code are read; any other keys
/// (English names, administrative codes, ids) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographyItem {
    pub province_name_th: String,
    pub district_name_th: String,
    pub subdistrict_name_th: String,
    pub postal_code: PostalCodeValue,
}

impl From<GeographyItem> for AddressRecord {
    fn from(item: GeographyItem) -> Self {
        Self {
            postal_code: item.postal_code.render(),
            province: item.province_name_th,
            district: item.district_name_th,
            sub_district: item.subdistrict_name_th,
        }
    }
}

/// Parses a raw gazetteer (a JSON array of [`GeographyItem`]) into records.
///
/// Every row is checked with [`AddressRecord::check`]; the first bad row fails
/// the whole parse so downstream code can rely on the record invariants.
#[instrument(name = "Parse gazetteer", skip_all, level = "debug")]
pub fn parse_geography(bytes: &[u8]) -> Result<Vec<AddressRecord>> {
    let items: Vec<GeographyItem> = serde_json::from_slice(bytes)?;
    trace!(items = items.len(), "Deserialized gazetteer items");

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record = AddressRecord::from(item);
            record
                .check()
                .map(|()| record)
                .map_err(|reason| DataError::InvalidRecord { index, reason })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_utils::single_item_json;

    #[test]
    fn test_numeric_postal_code_is_rendered_as_text() {
        let records = parse_geography(single_item_json("10330").as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].postal_code, "10330");
        assert_eq!(records[0].sub_district, "ลุมพินี");
    }

    #[test]
    fn test_numeric_postal_code_keeps_leading_zeros() {
        let records = parse_geography(single_item_json("1234").as_bytes()).unwrap();
        assert_eq!(records[0].postal_code, "01234");
    }

    #[test]
    fn test_string_postal_code_is_trimmed() {
        let records = parse_geography(single_item_json(r#"" 10330 ""#).as_bytes()).unwrap();
        assert_eq!(records[0].postal_code, "10330");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"[{"id":7,"provinceNameTh":"ภูเก็ต","provinceNameEn":"Phuket",
            "districtNameTh":"กะทู้","subdistrictNameTh":"ป่าตอง","postalCode":83150}]"#;
        let records = parse_geography(json.as_bytes()).unwrap();
        assert_eq!(
            records[0],
            AddressRecord::new("ภูเก็ต", "กะทู้", "ป่าตอง", "83150")
        );
    }

    #[test]
    fn test_invalid_postal_code_is_rejected_with_index() {
        let err = parse_geography(single_item_json("123456").as_bytes()).unwrap_err();
        assert!(
            matches!(err, DataError::InvalidRecord { index: 0, .. }),
            "Unexpected error: {err}"
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let json = r#"[{"provinceNameTh":" ","districtNameTh":"กะทู้",
            "subdistrictNameTh":"ป่าตอง","postalCode":83150}]"#;
        let err = parse_geography(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("province is empty"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            parse_geography(b"{not json"),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn test_record_serializes_in_camel_case() {
        let record = AddressRecord::new("ภูเก็ต", "กะทู้", "ป่าตอง", "83150");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["subDistrict"], "ป่าตอง");
        assert_eq!(value["postalCode"], "83150");
    }

    #[test]
    fn test_display() {
        let record = AddressRecord::new("ภูเก็ต", "กะทู้", "ป่าตอง", "83150");
        assert_eq!(record.to_string(), "ป่าตอง, กะทู้, ภูเก็ต 83150");
    }
}
