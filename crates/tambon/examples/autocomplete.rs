//! Autocomplete as the user types
//!
//! This example demonstrates ranked suggestions:
//! - Default and per-query limits
//! - Configured limits and scoring presets
//! - Answering many queries at once

use tambon::{AddressBook, AutocompleteQuery, LookupConfigBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let book = AddressBook::new_embedded()?;

    // Simulate a user typing a province name one character group at a time
    for typed in ["เชีย", "เชียงให", "เชียงใหม่"] {
        let suggestions = book.autocomplete(AutocompleteQuery::new(typed).with_limit(3));
        println!("'{typed}':");
        for record in &suggestions {
            println!("  {record}");
        }
    }

    // A postal code typed in full matches every record it serves
    println!("\n'83110' -> {} suggestions", book.autocomplete("83110").len());

    // Configure a compact dropdown that favours postal code hits
    let config = LookupConfigBuilder::compact()
        .scoring()
        .prioritize_postal_code()
        .done()
        .build();
    let compact = book.clone().with_config(config);
    println!("Compact dropdown for 'ปทุม': {:?}", compact.autocomplete("ปทุม"));

    // Batch processing, evaluated in parallel
    let queries: Vec<AutocompleteQuery> = ["ภูเก็ต", "บางเขน", "10330"]
        .into_iter()
        .map(AutocompleteQuery::from)
        .collect();
    for (query, results) in queries.iter().zip(book.autocomplete_bulk(&queries)) {
        println!("'{}' -> {} results", query.query, results.len());
    }

    Ok(())
}
