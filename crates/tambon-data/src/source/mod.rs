//! Loader strategies for the gazetteer.
//!
//! Each deployment target obtains its records differently: a binary with the
//! dataset compiled in, a service reading a file next to it, a client
//! downloading it once and caching it. Every strategy implements
//! [`DatasetLoader`]; [`DataSource`] picks one at the application's
//! composition root.
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};

use super::error::{DataError, Result};
use crate::{
    AddressRecord, DATA_FILE_ENV, GEOGRAPHY_FILE, GEOGRAPHY_MIN_FILE, embedded, get_data_dir,
    parse_geography,
};

#[cfg(feature = "download_data")]
pub mod fetch;

/// A way of producing the gazetteer records.
///
/// Implementations may block (file reads, network). They must return records
/// that satisfy [`AddressRecord::check`].
pub trait DatasetLoader: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produces the full, ordered record sequence.
    fn load(&self) -> Result<Vec<AddressRecord>>;
}

/// The gazetteer compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl DatasetLoader for EmbeddedLoader {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn load(&self) -> Result<Vec<AddressRecord>> {
        embedded::load_embedded_records()
    }
}

/// Reads a gazetteer JSON file from an explicit path.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetLoader for FileLoader {
    fn name(&self) -> &'static str {
        "file"
    }

    #[instrument(name = "Read gazetteer file", skip(self), fields(path = ?self.path), level = "debug")]
    fn load(&self) -> Result<Vec<AddressRecord>> {
        let bytes = fs::read(&self.path)?;
        parse_geography(&bytes)
    }
}

/// Checks an ordered list of candidate paths and loads the first one present.
#[derive(Debug, Clone)]
pub struct DiscoverLoader {
    candidates: Vec<PathBuf>,
}

impl DiscoverLoader {
    /// Candidates, in order: `TAMBON_DATA_FILE`, the data directory, then the
    /// conventional `data/`, `src/data/`, `public/data/` and `dist/data/`
    /// folders under the working directory.
    pub fn new() -> Self {
        let mut candidates = Vec::new();
        if let Some(file) = std::env::var_os(DATA_FILE_ENV) {
            candidates.push(PathBuf::from(file));
        }
        let data_dir = get_data_dir();
        candidates.push(data_dir.join(GEOGRAPHY_FILE));
        candidates.push(data_dir.join(GEOGRAPHY_MIN_FILE));
        for dir in ["data", "src/data", "public/data", "dist/data"] {
            candidates.push(Path::new(dir).join(GEOGRAPHY_FILE));
        }
        Self::with_candidates(candidates)
    }

    /// Uses exactly `candidates`, dropping repeats while keeping first-seen order.
    pub fn with_candidates(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::new();
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        Self { candidates: unique }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first candidate that exists on disk.
    pub fn resolve(&self) -> Result<&Path> {
        self.candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .map(PathBuf::as_path)
            .ok_or_else(|| DataError::DatasetNotFound {
                searched: self.candidates.clone(),
            })
    }
}

impl Default for DiscoverLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader for DiscoverLoader {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn load(&self) -> Result<Vec<AddressRecord>> {
        match self.resolve() {
            Ok(path) => {
                info!(path = ?path, "Found gazetteer file");
                FileLoader::new(path).load()
            }
            Err(e) => {
                warn!(candidates = self.candidates.len(), "No gazetteer file found");
                Err(e)
            }
        }
    }
}

/// Serves records that are already in memory, typically fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    records: Vec<AddressRecord>,
}

impl StaticLoader {
    pub fn new(records: Vec<AddressRecord>) -> Self {
        Self { records }
    }
}

impl DatasetLoader for StaticLoader {
    fn name(&self) -> &'static str {
        "static"
    }

    fn load(&self) -> Result<Vec<AddressRecord>> {
        self.records
            .iter()
            .enumerate()
            .try_for_each(|(index, record)| {
                record
                    .check()
                    .map_err(|reason| DataError::InvalidRecord { index, reason })
            })?;
        Ok(self.records.clone())
    }
}

/// Where the gazetteer should come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    /// The dataset compiled into the binary
    #[default]
    Embedded,
    /// A gazetteer JSON file at a known path
    File(PathBuf),
    /// The first gazetteer file found among the conventional locations
    Discover,
    /// Download (and cache) the gazetteer from a URL
    #[cfg(feature = "download_data")]
    Url(String),
    /// Records supplied by the caller
    Records(Vec<AddressRecord>),
}

impl DataSource {
    /// Picks a source from the environment: `TAMBON_DATA_URL` first (when
    /// downloads are enabled), then `TAMBON_DATA_FILE`, else the embedded data.
    pub fn from_env() -> Self {
        if let Some(source) = Self::url_from_env() {
            return source;
        }
        if let Some(file) = std::env::var_os(DATA_FILE_ENV) {
            debug!(file = ?file, "Using gazetteer file from environment");
            return Self::File(PathBuf::from(file));
        }
        Self::Embedded
    }

    #[cfg(feature = "download_data")]
    fn url_from_env() -> Option<Self> {
        std::env::var(crate::DATA_URL_ENV).ok().map(|url| {
            debug!(url = %url, "Using gazetteer URL from environment");
            Self::Url(url)
        })
    }

    #[cfg(not(feature = "download_data"))]
    fn url_from_env() -> Option<Self> {
        None
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::File(_) => "file",
            Self::Discover => "discover",
            #[cfg(feature = "download_data")]
            Self::Url(_) => "url",
            Self::Records(_) => "records",
        }
    }

    /// The loader strategy for this source.
    pub fn loader(&self) -> Box<dyn DatasetLoader> {
        match self {
            Self::Embedded => Box::new(EmbeddedLoader),
            Self::File(path) => Box::new(FileLoader::new(path.clone())),
            Self::Discover => Box::new(DiscoverLoader::new()),
            #[cfg(feature = "download_data")]
            Self::Url(url) => Box::new(fetch::HttpLoader::new(url.clone())),
            Self::Records(records) => Box::new(StaticLoader::new(records.clone())),
        }
    }
}
