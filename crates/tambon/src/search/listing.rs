use ahash::AHashSet as HashSet;
use itertools::Itertools;

use crate::{
    index::{NormalizedFields, RecordIndex},
    normalize::normalize_text,
};

// Distinct values in byte order (Unicode scalar order for UTF-8).
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<HashSet<&str>>()
        .into_iter()
        .sorted_unstable()
        .map(str::to_string)
        .collect()
}

fn is_in(fields: &NormalizedFields, district: Option<&str>, province: &str) -> bool {
    fields.province == province && district.is_none_or(|d| fields.district == d)
}

pub fn list_provinces_inner(index: &RecordIndex) -> Vec<String> {
    distinct_sorted(index.iter().map(|(record, _)| record.province.as_str()))
}

/// Districts of the province whose normalized name equals `province`.
pub fn list_districts_inner(index: &RecordIndex, province: &str) -> Vec<String> {
    let province = normalize_text(province);
    distinct_sorted(
        index
            .iter()
            .filter(|(_, fields)| is_in(fields, None, &province))
            .map(|(record, _)| record.district.as_str()),
    )
}

pub fn list_sub_districts_inner(index: &RecordIndex, district: &str, province: &str) -> Vec<String> {
    let district = normalize_text(district);
    let province = normalize_text(province);
    distinct_sorted(
        index
            .iter()
            .filter(|(_, fields)| is_in(fields, Some(district.as_str()), &province))
            .map(|(record, _)| record.sub_district.as_str()),
    )
}

/// Postal codes serving one sub-district. Most have one; some have several.
pub fn list_postal_codes_inner(
    index: &RecordIndex,
    sub_district: &str,
    district: &str,
    province: &str,
) -> Vec<String> {
    let sub_district = normalize_text(sub_district);
    let district = normalize_text(district);
    let province = normalize_text(province);
    distinct_sorted(
        index
            .iter()
            .filter(|(_, fields)| {
                fields.sub_district == sub_district && is_in(fields, Some(district.as_str()), &province)
            })
            .map(|(record, _)| record.postal_code.as_str()),
    )
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

    fn assert_sorted_unique(values: &[String]) {
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
    }

    #[rstest]
    fn test_list_provinces(index: RecordIndex) {
        let provinces = list_provinces_inner(&index);
        assert_eq!(provinces.len(), 6);
        assert_sorted_unique(&provinces);
        assert!(provinces.contains(&"นครราชสีมา".to_string()));
    }

    #[rstest]
    fn test_list_districts(index: RecordIndex) {
        let districts = list_districts_inner(&index, "กรุงเทพ มหานคร");
        assert_eq!(districts.len(), 3);
        assert_sorted_unique(&districts);
        assert!(districts.contains(&"ปทุมวัน".to_string()));
        assert!(list_districts_inner(&index, "กรุงเทพ").is_empty());
        assert!(list_districts_inner(&index, "").is_empty());
    }

    #[rstest]
    fn test_list_sub_districts_scoped_by_province(index: RecordIndex) {
        assert_eq!(
            list_sub_districts_inner(&index, "เฉลิมพระเกียรติ", "สระบุรี"),
            ["ผึ้งรวง"]
        );
        assert_eq!(
            list_sub_districts_inner(&index, "ปทุมวัน", "กรุงเทพมหานคร"),
            ["ปทุมวัน", "ลุมพินี"]
        );
        assert!(list_sub_districts_inner(&index, "ปทุมวัน", "เชียงใหม่").is_empty());
    }

    #[rstest]
    fn test_list_postal_codes(index: RecordIndex) {
        assert_eq!(
            list_postal_codes_inner(&index, "ประชาธิปัตย์", "ธัญบุรี", "ปทุมธานี"),
            ["12110", "12130"]
        );
        assert_eq!(
            list_postal_codes_inner(&index, "ลุมพินี", "ปทุมวัน", "กรุงเทพมหานคร"),
            ["10330"]
        );
        assert!(list_postal_codes_inner(&index, "ลุมพินี", "ปทุมวัน", "ภูเก็ต").is_empty());
    }
}
