//! Validating submitted addresses
//!
//! Shows the shape check for postal codes, hierarchy checks for partially
//! filled forms, and full validation of typed and untyped (JSON) input.

use serde_json::json;
use tambon::{AddressBook, AddressRecord, validate_postal_code, validate_postal_code_value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let book = AddressBook::new_embedded()?;

    for code in ["10330", " 50200 ", "1033", "abcde"] {
        println!("postal code {code:?}: {}", validate_postal_code(code));
    }
    println!("numeric postal code: {}", validate_postal_code_value(&json!(10330)));

    println!(
        "ปทุมวัน in กรุงเทพมหานคร: {}",
        book.is_valid_district("ปทุมวัน", Some("กรุงเทพมหานคร"))
    );
    println!(
        "ปทุมวัน in เชียงใหม่: {}",
        book.is_valid_district("ปทุมวัน", Some("เชียงใหม่"))
    );

    let address = AddressRecord::new("กรุงเทพมหานคร", "ปทุมวัน", "ลุมพินี", "10330");
    println!("{address}: {}", book.validate_address(&address));

    let wrong_code = AddressRecord {
        postal_code: "10500".into(),
        ..address
    };
    println!("{wrong_code}: {}", book.validate_address(&wrong_code));

    let submitted = json!({
        "province": "เชียงใหม่",
        "district": "เมืองเชียงใหม่",
        "subDistrict": "ศรีภูมิ",
        "postalCode": "50200"
    });
    println!("submitted form: {}", book.validate_address_value(&submitted));

    Ok(())
}
