use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use super::DatasetLoader;
use crate::{
    AddressRecord, DATA_URL_ENV, DataError, GEOGRAPHY_FILE, Result, get_data_dir, parse_geography,
};

const CACHE_METADATA_FILE: &str = "metadata.json";

/// Written next to a downloaded gazetteer so later runs know where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub records: usize,
    pub size_bytes: u64,
}

/// Downloads the gazetteer, validates it, then caches it in the data directory.
///
/// The cached copy lands at `<cache_dir>/geography.json`, which is also where
/// [`super::DiscoverLoader`] looks. When that file and its metadata are present
/// and the metadata names the same URL, `load` reads the cache and skips the
/// network. [`HttpLoader::with_refresh`] forces a fresh download.
///
/// Loading blocks on a private Tokio runtime and must not be called from
/// inside another Tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    url: String,
    cache_dir: PathBuf,
    refresh: bool,
}

impl HttpLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache_dir: get_data_dir().to_path_buf(),
            refresh: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        std::env::var(DATA_URL_ENV)
            .map(Self::new)
            .map_err(|_| DataError::NoUrlProvided)
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Always download, even when a matching cache exists.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cached_path(&self) -> PathBuf {
        self.cache_dir.join(GEOGRAPHY_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_METADATA_FILE)
    }

    /// Reads the metadata of a previous download, if any.
    pub fn cached_metadata(&self) -> Result<Option<CacheMetadata>> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Records from a previous download of this same URL, if one is cached.
    ///
    /// Unreadable metadata counts as no cache.
    fn load_cached(&self) -> Result<Option<Vec<AddressRecord>>> {
        let cached_path = self.cached_path();
        if !cached_path.is_file() {
            return Ok(None);
        }
        match self.cached_metadata() {
            Ok(Some(metadata)) if metadata.source_url == self.url => {}
            Ok(_) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cache metadata");
                return Ok(None);
            }
        }
        let bytes = fs::read(&cached_path)?;
        let records = parse_geography(&bytes)?;
        info!(path = ?cached_path, records = records.len(), "Using cached gazetteer");
        Ok(Some(records))
    }
}

impl DatasetLoader for HttpLoader {
    fn name(&self) -> &'static str {
        "url"
    }

    #[instrument(name = "Download gazetteer", skip(self), fields(url = %self.url), level = "info")]
    fn load(&self) -> Result<Vec<AddressRecord>> {
        if self.url.trim().is_empty() {
            return Err(DataError::NoUrlProvided);
        }
        if !self.refresh
            && let Some(records) = self.load_cached()?
        {
            return Ok(records);
        }
        fs::create_dir_all(&self.cache_dir)?;

        let rt = tokio::runtime::Runtime::new()?;
        let downloaded = rt.block_on(async {
            let client = Client::new();
            download_to_temp_file(&client, &self.url, &self.cache_dir).await
        })?;

        // Parse before persisting so a bad download never replaces a good cache.
        let bytes = fs::read(downloaded.path())?;
        let records = parse_geography(&bytes)?;

        let cached_path = self.cached_path();
        downloaded
            .persist(&cached_path)
            .map_err(|e| DataError::Io(e.error))?;
        write_metadata(
            &self.metadata_path(),
            &CacheMetadata {
                source_url: self.url.clone(),
                fetched_at: Utc::now(),
                records: records.len(),
                size_bytes: bytes.len() as u64,
            },
        )?;
        info!(path = ?cached_path, records = records.len(), "Cached downloaded gazetteer");

        Ok(records)
    }
}

fn write_metadata(path: &Path, metadata: &CacheMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(path, json)?;
    Ok(())
}

/// Streams `url` into a temp file created inside `dir`, so the final rename
/// into the cache stays on one filesystem.
async fn download_to_temp_file(client: &Client, url: &str, dir: &Path) -> Result<NamedTempFile> {
    info!(url, "Starting download");
    let response = client.get(url).send().await?.error_for_status()?;

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})").expect("Progress bar template")
        .progress_chars("█░"));
    pb.set_message(format!(
        "Downloading {}",
        url.split('/').next_back().unwrap_or(url)
    ));

    let temp_file = NamedTempFile::new_in(dir)?;
    let mut dest_file = tokio::fs::File::create(temp_file.path()).await?;

    let mut stream = response.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = item?;
        dest_file.write_all(&chunk).await?;
        pb.inc(chunk.len() as u64);
    }
    dest_file.flush().await?;
    pb.finish_and_clear();
    Ok(temp_file)
}
