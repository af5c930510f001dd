use std::{ops::Deref, sync::Arc};

use once_cell::sync::OnceCell;
use tracing::{info, instrument};

use super::error::Result;
use crate::{AddressRecord, DataSource};

/// Immutable, shared, ordered gazetteer.
///
/// Cloning is cheap and never copies records, so every clone observes the same
/// sequence for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[AddressRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<AddressRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    /// True when both handles point at the same loaded sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Deref for Dataset {
    type Target = [AddressRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<AddressRecord>> for Dataset {
    fn from(records: Vec<AddressRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<AddressRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = AddressRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Runs the loader for `source` and wraps the result in a [`Dataset`].
#[instrument(name = "Load gazetteer", skip_all, fields(source = source.name()), level = "info")]
pub fn load_dataset(source: &DataSource) -> Result<Dataset> {
    let t_load = std::time::Instant::now();
    let records = source.loader().load()?;
    info!(
        records = records.len(),
        elapsed = ?t_load.elapsed(),
        "Gazetteer loaded into memory"
    );
    Ok(Dataset::new(records))
}

/// A data source paired with a load-once cache of its dataset.
///
/// The first successful [`AddressData::dataset`] call loads and memoizes the
/// records; later calls return the same handle. A failed load is not cached,
/// so it may be retried.
#[derive(Debug, Clone)]
pub struct AddressData {
    source: DataSource,
    dataset: OnceCell<Dataset>,
}

impl AddressData {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            dataset: OnceCell::new(),
        }
    }

    pub fn new_embedded() -> Self {
        Self::new(DataSource::Embedded)
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset.get_or_try_init(|| load_dataset(&self.source))
    }
}

impl Default for AddressData {
    fn default() -> Self {
        Self::new_embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataError, TestDataConfig, test_records};

    #[test]
    fn test_dataset_clones_share_records() {
        let dataset = Dataset::new(test_records(&TestDataConfig::minimal()));
        let clone = dataset.clone();
        assert!(dataset.ptr_eq(&clone));
        assert_eq!(dataset.len(), clone.len());
    }

    #[test]
    fn test_address_data_loads_once() {
        let data = AddressData::new(DataSource::Records(test_records(
            &TestDataConfig::minimal(),
        )));
        assert!(!data.is_loaded());

        let first = data.dataset().unwrap().clone();
        assert!(data.is_loaded());
        let second = data.dataset().unwrap();

        assert!(first.ptr_eq(second), "Memoized dataset should be reused");
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let data = AddressData::new(DataSource::File("/definitely/not/here.json".into()));
        assert!(matches!(data.dataset(), Err(DataError::Io(_))));
        assert!(!data.is_loaded());
    }

    #[test]
    fn test_embedded_address_data() {
        let data = AddressData::default();
        let dataset = data.dataset().expect("Embedded gazetteer should load");
        assert!(!dataset.is_empty());
    }
}
