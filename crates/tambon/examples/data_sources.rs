//! Data source and initialization patterns
//!
//! This example demonstrates the different ways to obtain the gazetteer.

use tambon::{AddressBook, AddressData, DataSource, data::DiscoverLoader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tambon::init_logging(tracing::Level::INFO)?;

    // Method 1: Embedded data (fastest startup, no I/O)
    println!("1. Embedded data:");
    let book = AddressBook::new_embedded()?;
    println!("   {}\n", book.info().summary());

    // Method 2: Whatever the environment points at (TAMBON_DATA_URL, TAMBON_DATA_FILE)
    println!("2. Source from environment: {:?}", DataSource::from_env());

    // Method 3: Discover a full geography.json in the conventional locations,
    // falling back to the embedded data when none is present
    println!("\n3. Discovery candidates:");
    for candidate in DiscoverLoader::new().candidates() {
        println!("   {}", candidate.display());
    }
    let discovered = AddressBook::builder()
        .data_source(DataSource::Discover)
        .embedded_fallback(true)
        .build()?;
    println!("   {}\n", discovered.info().summary());

    // Method 4: A memoized handle shared by several books
    println!("4. Shared handle:");
    let data = AddressData::new_embedded();
    let first = AddressBook::from_data(&data)?;
    let second = AddressBook::from_data(&data)?;
    println!(
        "   Both books share one dataset: {}",
        first.dataset().ptr_eq(second.dataset())
    );

    Ok(())
}
