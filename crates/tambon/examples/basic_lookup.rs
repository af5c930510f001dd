//! Basic address lookups
//!
//! This example demonstrates the fundamental lookup operations:
//! - Creating an address book from embedded data
//! - Structured search with several criteria
//! - Walking the province / district / sub-district hierarchy

use tambon::{AddressBook, AddressRecord, SearchCriteria};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tambon::init_logging(tracing::Level::WARN)?;

    // Create an address book using embedded data (no downloads needed)
    let book = AddressBook::new_embedded()?;
    println!("{}\n", book.info().summary());

    // Everything served by one postal code
    println!("Postal code 10100:");
    print_records(&book.find_by_postal_code("10100"), 5);

    // Structured search: every given field must match
    println!("\nBangkok districts starting with 'บาง':");
    let criteria = SearchCriteria::new().province("กรุงเทพมหานคร").district("บาง");
    print_records(&book.search_addresses(&criteria), 5);

    // Walk the hierarchy the way a cascading form would
    println!("\nHierarchy for ภูเก็ต:");
    for district in book.list_districts("ภูเก็ต") {
        let sub_districts = book.list_sub_districts(&district, "ภูเก็ต");
        println!("  {district}: {}", sub_districts.join(", "));
    }

    Ok(())
}

fn print_records(records: &[AddressRecord], limit: usize) {
    for (i, record) in records.iter().take(limit).enumerate() {
        println!("  {}. {record}", i + 1);
    }

    if records.len() > limit {
        println!("  ... and {} more results", records.len() - limit);
    }
}
