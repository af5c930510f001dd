use tambon_data::AddressRecord;
use tracing::debug;

use crate::{
    index::{NormalizedFields, RecordIndex},
    normalize::{normalize_optional, normalize_text},
};

/// Fields a structured search may constrain. Every field that is set must match.
///
/// Name fields match by substring on normalized text; `postal_code` matches
/// exactly after trimming. Fields that are blank count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct SearchCriteria {
    pub province: Option<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub postal_code: Option<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn sub_district(mut self, sub_district: impl Into<String>) -> Self {
        self.sub_district = Some(sub_district.into());
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// True when no field would constrain a search.
    pub fn is_empty(&self) -> bool {
        CompiledCriteria::new(self).is_none()
    }
}

/// Criteria with blank fields dropped and names normalized once.
struct CompiledCriteria<'a> {
    province: Option<String>,
    district: Option<String>,
    sub_district: Option<String>,
    postal_code: Option<&'a str>,
}

impl<'a> CompiledCriteria<'a> {
    fn new(criteria: &'a SearchCriteria) -> Option<Self> {
        let compiled = Self {
            province: normalize_optional(criteria.province.as_deref()),
            district: normalize_optional(criteria.district.as_deref()),
            sub_district: normalize_optional(criteria.sub_district.as_deref()),
            postal_code: criteria
                .postal_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty()),
        };
        let any_set = compiled.province.is_some()
            || compiled.district.is_some()
            || compiled.sub_district.is_some()
            || compiled.postal_code.is_some();
        any_set.then_some(compiled)
    }

    fn matches(&self, record: &AddressRecord, fields: &NormalizedFields) -> bool {
        contains_opt(&fields.province, self.province.as_deref())
            && contains_opt(&fields.district, self.district.as_deref())
            && contains_opt(&fields.sub_district, self.sub_district.as_deref())
            && self
                .postal_code
                .is_none_or(|code| record.postal_code == code)
    }
}

fn contains_opt(field: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| field.contains(needle))
}

fn collect_matching<F>(index: &RecordIndex, mut predicate: F) -> Vec<AddressRecord>
where
    F: FnMut(&AddressRecord, &NormalizedFields) -> bool,
{
    index
        .iter()
        .filter(|(record, fields)| predicate(record, fields))
        .map(|(record, _)| record.clone())
        .collect()
}

/// Records matching every set field of `criteria`, in dataset order.
pub fn search_addresses_inner(index: &RecordIndex, criteria: &SearchCriteria) -> Vec<AddressRecord> {
    let Some(compiled) = CompiledCriteria::new(criteria) else {
        debug!("Search criteria empty, returning no results");
        return Vec::new();
    };
    let results = collect_matching(index, |record, fields| compiled.matches(record, fields));
    debug!(results = results.len(), "Structured search complete");
    results
}

pub fn find_by_postal_code_inner(index: &RecordIndex, postal_code: &str) -> Vec<AddressRecord> {
    let code = postal_code.trim();
    if code.is_empty() {
        return Vec::new();
    }
    collect_matching(index, |record, _| record.postal_code == code)
}

pub fn find_by_province_inner(index: &RecordIndex, province: &str) -> Vec<AddressRecord> {
    let needle = normalize_text(province);
    if needle.is_empty() {
        return Vec::new();
    }
    collect_matching(index, |_, fields| fields.province.contains(&needle))
}

/// Records whose district contains `district`, optionally narrowed by province.
///
/// A blank `province` is ignored rather than matching everything.
pub fn find_by_district_inner(
    index: &RecordIndex,
    district: &str,
    province: Option<&str>,
) -> Vec<AddressRecord> {
    let needle = normalize_text(district);
    if needle.is_empty() {
        return Vec::new();
    }
    let province = normalize_optional(province);
    collect_matching(index, |_, fields| {
        fields.district.contains(&needle) && contains_opt(&fields.province, province.as_deref())
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tambon_data::{Dataset, TestDataConfig, test_records};

    use super::*;

    #[fixture]
    fn index() -> RecordIndex {
        RecordIndex::new(Dataset::new(test_records(&TestDataConfig::sample())))
    }

    #[rstest]
    fn test_empty_criteria_returns_nothing(index: RecordIndex) {
        assert!(search_addresses_inner(&index, &SearchCriteria::new()).is_empty());
        let blank = SearchCriteria::new().province("  ").postal_code("\t");
        assert!(blank.is_empty());
        assert!(search_addresses_inner(&index, &blank).is_empty());
    }

    #[rstest]
    fn test_search_by_district_substring(index: RecordIndex) {
        let results = search_addresses_inner(&index, &SearchCriteria::new().district("ปทุมวัน"));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.district == "ปทุมวัน"));
    }

    #[rstest]
    fn test_search_criteria_are_and_combined(index: RecordIndex) {
        let criteria = SearchCriteria::new()
            .province("กรุงเทพ")
            .postal_code(" 10100 ");
        let results = search_addresses_inner(&index, &criteria);
        assert_eq!(results.len(), 2);
        assert!(
            results
                .iter()
                .all(|r| r.province == "กรุงเทพมหานคร" && r.postal_code == "10100")
        );

        let none = SearchCriteria::new().province("ภูเก็ต").postal_code("10100");
        assert!(search_addresses_inner(&index, &none).is_empty());
    }

    #[rstest]
    fn test_search_keeps_dataset_order(index: RecordIndex) {
        let results = search_addresses_inner(&index, &SearchCriteria::new().province("ปทุม"));
        let sub_districts: Vec<_> = results.iter().map(|r| r.sub_district.as_str()).collect();
        assert_eq!(sub_districts, ["บางปรอก", "ประชาธิปัตย์", "ประชาธิปัตย์"]);
    }

    #[rstest]
    #[case("10100", 2)]
    #[case(" 83150 ", 2)]
    #[case("99999", 0)]
    #[case("", 0)]
    #[case("   ", 0)]
    fn test_find_by_postal_code(index: RecordIndex, #[case] code: &str, #[case] expected: usize) {
        let results = find_by_postal_code_inner(&index, code);
        assert_eq!(results.len(), expected);
        assert!(results.iter().all(|r| r.postal_code == code.trim()));
    }

    #[rstest]
    fn test_find_by_province(index: RecordIndex) {
        assert_eq!(find_by_province_inner(&index, "เชียงใหม่").len(), 3);
        assert_eq!(find_by_province_inner(&index, " เชียง ใหม่ ").len(), 3);
        assert!(find_by_province_inner(&index, "").is_empty());
        assert!(find_by_province_inner(&index, "ไม่มีจังหวัดนี้").is_empty());
    }

    #[rstest]
    fn test_find_by_district_narrowed_by_province(index: RecordIndex) {
        assert_eq!(find_by_district_inner(&index, "เฉลิมพระเกียรติ", None).len(), 2);

        let saraburi = find_by_district_inner(&index, "เฉลิมพระเกียรติ", Some("สระบุรี"));
        assert_eq!(saraburi.len(), 1);
        assert_eq!(saraburi[0].sub_district, "ผึ้งรวง");

        assert_eq!(
            find_by_district_inner(&index, "เฉลิมพระเกียรติ", Some("  ")).len(),
            2
        );
        assert!(find_by_district_inner(&index, " ", Some("สระบุรี")).is_empty());
    }

    #[test]
    fn test_latin_names_fold_case_and_spacing() {
        let index = RecordIndex::new(Dataset::new(test_records(&TestDataConfig::minimal())));
        let results = find_by_district_inner(&index, "PATHUMWAN", Some("bang kok"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sub_district, "Lumphini");
    }
}
