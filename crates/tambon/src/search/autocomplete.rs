use rayon::prelude::*;
use tambon_data::AddressRecord;
use tracing::{debug, instrument};

use super::LookupConfig;
use crate::{
    index::{NormalizedFields, RecordIndex},
    normalize::normalize_text,
};

/// A free-text autocomplete request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AutocompleteQuery {
    pub query: String,
    /// Maximum number of suggestions; the configured limit applies when unset
    #[cfg_attr(feature = "serde", serde(default))]
    pub limit: Option<usize>,
}

impl AutocompleteQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<&str> for AutocompleteQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for AutocompleteQuery {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

/// Bonuses for one name field. A field can earn all three at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldWeights {
    pub equals: u32,
    pub starts_with: u32,
    pub contains: u32,
}

impl FieldWeights {
    pub const fn new(equals: u32, starts_with: u32, contains: u32) -> Self {
        Self {
            equals,
            starts_with,
            contains,
        }
    }

    fn score(&self, field: &str, query: &str) -> u32 {
        let mut score = 0u32;
        if field == query {
            score = score.saturating_add(self.equals);
        }
        if field.starts_with(query) {
            score = score.saturating_add(self.starts_with);
        }
        if field.contains(query) {
            score = score.saturating_add(self.contains);
        }
        score
    }

    fn check(&self, field: &str) -> Result<(), String> {
        if self.equals > self.starts_with && self.starts_with > self.contains && self.contains > 0
        {
            Ok(())
        } else {
            Err(format!(
                "{field} weights must satisfy equals > starts_with > contains > 0, got {self:?}"
            ))
        }
    }
}

/// The autocomplete bonus table.
///
/// The default scores an exact province match at 100 + 50 + 20 = 170, and a
/// postal code typed exactly as stored at 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    pub province: FieldWeights,
    pub district: FieldWeights,
    pub sub_district: FieldWeights,
    /// Bonus when the raw query equals the record's postal code
    pub postal_code: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            province: FieldWeights::new(100, 50, 20),
            district: FieldWeights::new(80, 40, 15),
            sub_district: FieldWeights::new(60, 30, 10),
            postal_code: 90,
        }
    }
}

impl ScoreWeights {
    /// Rejects tables in which a weaker kind of match could earn more than a stronger one.
    pub fn validate(&self) -> Result<(), String> {
        self.province.check("province")?;
        self.district.check("district")?;
        self.sub_district.check("sub_district")?;
        if self.postal_code == 0 {
            return Err("postal_code weight must be non-zero".to_string());
        }
        Ok(())
    }

    /// Relevance of one record; `raw_query` is compared verbatim against the postal code.
    pub(crate) fn score(
        &self,
        record: &AddressRecord,
        fields: &NormalizedFields,
        normalized_query: &str,
        raw_query: &str,
    ) -> u32 {
        // Weights are public and may skip `validate`, so sums saturate.
        let mut score = self
            .province
            .score(&fields.province, normalized_query)
            .saturating_add(self.district.score(&fields.district, normalized_query))
            .saturating_add(self.sub_district.score(&fields.sub_district, normalized_query));
        if record.postal_code == raw_query {
            score = score.saturating_add(self.postal_code);
        }
        score
    }
}

/// Ranks records against a free-text query, best first.
///
/// Records that earn no bonus are dropped. Equal scores keep dataset order.
pub fn autocomplete_inner(
    index: &RecordIndex,
    query: &AutocompleteQuery,
    config: &LookupConfig,
) -> Vec<AddressRecord> {
    let raw_query = query.query.as_str();
    if raw_query.trim().is_empty() {
        return Vec::new();
    }
    let limit = query.limit.unwrap_or(config.limit);
    if limit == 0 {
        return Vec::new();
    }

    let normalized_query = normalize_text(raw_query);
    let mut scored: Vec<(u32, &AddressRecord)> = index
        .iter()
        .filter_map(|(record, fields)| {
            let score = config
                .weights
                .score(record, fields, &normalized_query, raw_query);
            (score > 0).then_some((score, record))
        })
        .collect();

    // `sort_by` is stable, which keeps ties in dataset order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    debug!(
        candidates = scored.len(),
        limit, "Autocomplete candidates scored"
    );

    scored
        .into_iter()
        .take(limit)
        .map(|(_, record)| record.clone())
        .collect()
}

/// Runs independent autocomplete queries in parallel. Output order follows input order.
#[instrument(name = "Bulk autocomplete", skip_all, fields(queries = queries.len()), level = "debug")]
pub fn autocomplete_bulk_inner(
    index: &RecordIndex,
    queries: &[AutocompleteQuery],
    config: &LookupConfig,
) -> Vec<Vec<AddressRecord>> {
    queries
        .par_iter()
        .map(|query| autocomplete_inner(index, query, config))
        .collect()
}
