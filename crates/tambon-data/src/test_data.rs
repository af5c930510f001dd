use std::io::Write;

use tempfile::NamedTempFile;
use tracing::info;

use super::error::Result;
use crate::{AddressRecord, GeographyItem, PostalCodeValue};

/// Configuration for test data generation
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Maximum number of rows to emit
    pub rows: usize,
    /// Thai gazetteer rows, or a tiny romanized set
    pub realistic_data: bool,
    /// Write postal codes as JSON numbers (the published format) instead of strings
    pub numeric_postal_codes: bool,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self::sample()
    }
}

impl TestDataConfig {
    /// Minimal data for unit tests
    pub fn minimal() -> Self {
        Self {
            rows: 3,
            realistic_data: false,
            numeric_postal_codes: false,
        }
    }

    /// Sample data for ranking and validation tests
    pub fn sample() -> Self {
        Self {
            rows: usize::MAX,
            realistic_data: true,
            numeric_postal_codes: true,
        }
    }
}

// Romanized rows; exercise case folding and inner whitespace.
const MINIMAL_ROWS: [(&str, &str, &str, &str); 3] = [
    ("Bangkok", "Pathum Wan", "Lumphini", "10330"),
    ("Chiang Mai", "Mueang Chiang Mai", "Si Phum", "50200"),
    ("Phuket", "Kathu", "Patong", "83150"),
];

// Thai rows chosen for edge cases: a district equal to one of its
// sub-districts, a province sharing a prefix with another province's district,
// one district name under two provinces, and a sub-district with two codes.
const SAMPLE_ROWS: [(&str, &str, &str, &str); 14] = [
    ("กรุงเทพมหานคร", "ปทุมวัน", "ลุมพินี", "10330"),
    ("กรุงเทพมหานคร", "ปทุมวัน", "ปทุมวัน", "10330"),
    ("กรุงเทพมหานคร", "ป้อมปราบศัตรูพ่าย", "ป้อมปราบ", "10100"),
    ("กรุงเทพมหานคร", "สัมพันธวงศ์", "ตลาดน้อย", "10100"),
    ("ปทุมธานี", "เมืองปทุมธานี", "บางปรอก", "12000"),
    ("ปทุมธานี", "ธัญบุรี", "ประชาธิปัตย์", "12110"),
    ("ปทุมธานี", "ธัญบุรี", "ประชาธิปัตย์", "12130"),
    ("เชียงใหม่", "เมืองเชียงใหม่", "ศรีภูมิ", "50200"),
    ("เชียงใหม่", "เมืองเชียงใหม่", "ช้างคลาน", "50100"),
    ("เชียงใหม่", "หางดง", "หางดง", "50230"),
    ("สระบุรี", "เฉลิมพระเกียรติ", "ผึ้งรวง", "18000"),
    ("นครราชสีมา", "เฉลิมพระเกียรติ", "หนองงูเหลือม", "30230"),
    ("ภูเก็ต", "กะทู้", "ป่าตอง", "83150"),
    ("ภูเก็ต", "กะทู้", "กมลา", "83150"),
];

/// Build fixture records in memory.
pub fn test_records(config: &TestDataConfig) -> Vec<AddressRecord> {
    let rows: &[(&str, &str, &str, &str)] = if config.realistic_data {
        &SAMPLE_ROWS
    } else {
        &MINIMAL_ROWS
    };
    rows.iter()
        .take(config.rows)
        .map(|&(province, district, sub_district, postal_code)| {
            AddressRecord::new(province, district, sub_district, postal_code)
        })
        .collect()
}

/// Create a gazetteer file in a temporary location.
///
/// The file uses the raw `geography.json` layout so it exercises the same
/// parsing path as production data.
pub fn create_test_data(config: &TestDataConfig) -> Result<NamedTempFile> {
    info!("Creating test gazetteer with config: {:?}", config);

    let items: Vec<GeographyItem> = test_records(config)
        .into_iter()
        .map(|record| GeographyItem {
            postal_code: if config.numeric_postal_codes {
                record
                    .postal_code
                    .parse()
                    .map_or(PostalCodeValue::Text(record.postal_code), PostalCodeValue::Number)
            } else {
                PostalCodeValue::Text(record.postal_code)
            },
            province_name_th: record.province,
            district_name_th: record.district,
            subdistrict_name_th: record.sub_district,
        })
        .collect();

    let mut file = NamedTempFile::with_suffix(".json")?;
    serde_json::to_writer(&mut file, &items)?;
    file.flush()?;
    Ok(file)
}
