//! Normalized view of a gazetteer.
//!
//! Lookups compare normalized names on every record, so the normalized forms
//! are computed once per dataset and stored alongside it.
use std::sync::Arc;

use rayon::prelude::*;
use tambon_data::{AddressRecord, Dataset};
use tracing::{debug, instrument};

use crate::normalize::normalize_text;

/// Normalized name fields of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub province: String,
    pub district: String,
    pub sub_district: String,
}

impl NormalizedFields {
    pub fn from_record(record: &AddressRecord) -> Self {
        Self {
            province: normalize_text(&record.province),
            district: normalize_text(&record.district),
            sub_district: normalize_text(&record.sub_district),
        }
    }
}

/// A dataset paired with the normalized names of each of its records.
///
/// Position `i` of the normalized table always describes record `i` of the
/// dataset. Clones share both tables.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    dataset: Dataset,
    normalized: Arc<[NormalizedFields]>,
}

impl RecordIndex {
    #[instrument(name = "Build record index", skip_all, fields(records = dataset.len()), level = "debug")]
    pub fn new(dataset: Dataset) -> Self {
        let t_build = std::time::Instant::now();
        let normalized: Arc<[NormalizedFields]> = dataset
            .records()
            .par_iter()
            .map(NormalizedFields::from_record)
            .collect::<Vec<_>>()
            .into();
        debug!(elapsed = ?t_build.elapsed(), "Record index built");
        Self {
            dataset,
            normalized,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Records in dataset order, each with its normalized names.
    pub fn iter(&self) -> impl Iterator<Item = (&AddressRecord, &NormalizedFields)> {
        self.dataset.iter().zip(self.normalized.iter())
    }
}

impl From<Dataset> for RecordIndex {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}
