//! Shape and existence checks for user-entered addresses.
//!
//! Validation never fails loudly: blank, malformed or unknown input is simply
//! `false`.
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tambon_data::AddressRecord;

use crate::{
    index::RecordIndex,
    normalize::{normalize_optional, normalize_text},
};

static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("Postal code pattern is valid"));

/// True iff `postal_code`, once trimmed, is exactly five ASCII digits.
///
/// This checks the shape only; the code need not exist in any gazetteer.
pub fn validate_postal_code(postal_code: &str) -> bool {
    POSTAL_CODE_RE.is_match(postal_code.trim())
}

/// [`validate_postal_code`] for untyped input. Anything but a JSON string is invalid.
pub fn validate_postal_code_value(value: &Value) -> bool {
    value.as_str().is_some_and(validate_postal_code)
}

pub fn is_valid_province_inner(index: &RecordIndex, province: &str) -> bool {
    let province = normalize_text(province);
    !province.is_empty() && index.iter().any(|(_, fields)| fields.province == province)
}

/// Exact district match, scoped to `province` when one is given.
pub fn is_valid_district_inner(index: &RecordIndex, district: &str, province: Option<&str>) -> bool {
    let district = normalize_text(district);
    if district.is_empty() {
        return false;
    }
    let province = normalize_optional(province);
    index.iter().any(|(_, fields)| {
        fields.district == district && province.as_ref().is_none_or(|p| &fields.province == p)
    })
}

pub fn is_valid_sub_district_inner(
    index: &RecordIndex,
    sub_district: &str,
    district: Option<&str>,
    province: Option<&str>,
) -> bool {
    let sub_district = normalize_text(sub_district);
    if sub_district.is_empty() {
        return false;
    }
    let district = normalize_optional(district);
    let province = normalize_optional(province);
    index.iter().any(|(_, fields)| {
        fields.sub_district == sub_district
            && district.as_ref().is_none_or(|d| &fields.district == d)
            && province.as_ref().is_none_or(|p| &fields.province == p)
    })
}

/// True iff a gazetteer record has the same names (after normalization) and
/// exactly the same postal code.
pub fn validate_address_inner(index: &RecordIndex, address: &AddressRecord) -> bool {
    validate_address_fields(
        index,
        &address.province,
        &address.district,
        &address.sub_district,
        &address.postal_code,
    )
}

/// [`validate_address_inner`] for untyped input, e.g. a submitted form.
///
/// Expects an object with string `province`, `district`, `subDistrict` and
/// `postalCode` members; anything else is invalid.
pub fn validate_address_value_inner(index: &RecordIndex, value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let field = |name: &str| object.get(name).and_then(Value::as_str);
    match (
        field("province"),
        field("district"),
        field("subDistrict"),
        field("postalCode"),
    ) {
        (Some(province), Some(district), Some(sub_district), Some(postal_code)) => {
            validate_address_fields(index, province, district, sub_district, postal_code)
        }
        _ => false,
    }
}

fn validate_address_fields(
    index: &RecordIndex,
    province: &str,
    district: &str,
    sub_district: &str,
    postal_code: &str,
) -> bool {
    if [province, district, sub_district, postal_code]
        .iter()
        .any(|value| value.is_empty())
    {
        return false;
    }
    if !validate_postal_code(postal_code) {
        return false;
    }

    let province = normalize_text(province);
    let district = normalize_text(district);
    let sub_district = normalize_text(sub_district);
    index.iter().any(|(record, fields)| {
        fields.province == province
            && fields.district == district
            && fields.sub_district == sub_district
            && record.postal_code == postal_code
    })
}
