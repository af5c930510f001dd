//! Gazetteer loading for the `tambon` Thai address library.
//!
//! This crate owns everything about *where* the address records come from: the
//! record type itself, the raw gazetteer JSON format, the loader strategies
//! (embedded, local file, discovered file, remote download) and a lazily
//! memoized dataset handle. The search core only ever sees a [`Dataset`].
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod dataset;
pub mod embedded;
pub mod record;
pub mod source;
pub mod test_data;

pub const DATA_DIR_DEFAULT: &str = "./tambon_data";
/// Overrides the directory used for cached and discovered gazetteer files.
pub const DATA_DIR_ENV: &str = "TAMBON_DATA_DIR";
/// Points discovery at an explicit gazetteer file.
pub const DATA_FILE_ENV: &str = "TAMBON_DATA_FILE";
/// Remote gazetteer location used by [`DataSource::from_env`].
pub const DATA_URL_ENV: &str = "TAMBON_DATA_URL";

pub const GEOGRAPHY_FILE: &str = "geography.json";
pub const GEOGRAPHY_MIN_FILE: &str = "geography.min.json";

/// Global data directory path, resolved once from the environment.
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let dir = std::env::var_os(DATA_DIR_ENV).map_or_else(default_data_dir, PathBuf::from);
    debug!(data_dir = ?dir, "Resolved gazetteer data directory");
    dir
});

#[cfg(feature = "system-dirs")]
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tambon").map_or_else(
        || PathBuf::from(DATA_DIR_DEFAULT),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

#[cfg(not(feature = "system-dirs"))]
fn default_data_dir() -> PathBuf {
    PathBuf::from(DATA_DIR_DEFAULT)
}

pub fn get_data_dir() -> &'static Path {
    DATA_DIR.as_path()
}

mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum DataError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Gazetteer JSON error: {0}")]
        Json(#[from] serde_json::Error),
        #[cfg(feature = "download_data")]
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),
        #[error("Gazetteer file not found, searched: {searched:?}")]
        DatasetNotFound { searched: Vec<PathBuf> },
        #[error("Invalid gazetteer record at index {index}: {reason}")]
        InvalidRecord { index: usize, reason: String },
        #[error("No gazetteer URL provided (set TAMBON_DATA_URL)")]
        NoUrlProvided,
    }

    pub type Result<T> = std::result::Result<T, DataError>;
}

pub use error::{DataError, Result};

// Re-export main types
pub use dataset::{AddressData, Dataset, load_dataset};
pub use record::{AddressRecord, GeographyItem, PostalCodeValue, parse_geography};
#[cfg(feature = "download_data")]
pub use source::fetch::{CacheMetadata, HttpLoader};
pub use source::{
    DataSource, DatasetLoader, DiscoverLoader, EmbeddedLoader, FileLoader, StaticLoader,
};
pub use test_data::{TestDataConfig, create_test_data, test_records};

#[cfg(test)]
pub(crate) mod tests_utils {
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub fn write_geography_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn single_item_json(postal_code: &str) -> String {
        format!(
            r#"[{{"provinceNameTh":"กรุงเทพมหานคร","districtNameTh":"ปทุมวัน","subdistrictNameTh":"ลุมพินี","postalCode":{postal_code}}}]"#
        )
    }
}
