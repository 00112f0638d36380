use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Cache format version. Bump this when the cached layout changes so stale
/// downloads are invalidated automatically.
const CACHE_VERSION: u32 = 1;

const USER_AGENT: &str = concat!("picon-xref/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_HOST: &str = "https://api.github.com/";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Metadata about one cached download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSource {
    pub url: String,
    /// RFC 3339 timestamp
    pub downloaded: String,
    pub file_size: u64,
}

/// Metadata file tracking all cached downloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheMeta {
    #[serde(default)]
    pub version: u32,
    /// Keyed by cache file name.
    #[serde(default)]
    pub sources: BTreeMap<String, CachedSource>,
}

/// Information about a cached source for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub name: String,
    pub url: String,
    pub file_size: u64,
    pub downloaded: String,
}

/// Get the default cache directory for downloaded sources.
pub fn cache_dir() -> Result<PathBuf, SourceError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| SourceError::cache("Could not determine cache directory"))?;
    Ok(base.join("picon-xref"))
}

/// Downloaded sources under a cache root.
///
/// ```text
/// <root>/meta.json
/// <root>/sources/<name>
/// ```
#[derive(Debug, Clone)]
pub struct SourceCache {
    root: PathBuf,
}

impl SourceCache {
    /// The cache under the platform cache directory.
    pub fn open() -> Result<Self, SourceError> {
        Ok(Self::at(cache_dir()?))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sources_dir(&self) -> PathBuf {
        self.root.join("sources")
    }

    /// Path a source named `name` is stored under.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.sources_dir().join(name)
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join("meta.json")
    }

    /// Load cache metadata. A version mismatch clears the stale cache.
    fn load_meta(&self) -> Result<CacheMeta, SourceError> {
        let path = self.meta_path();
        if !path.exists() {
            return Ok(CacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        let contents = fs::read_to_string(&path)?;
        let meta: CacheMeta = serde_json::from_str(&contents)?;
        if meta.version != CACHE_VERSION {
            log::info!("Cache format changed, clearing {}", self.root.display());
            self.clear()?;
            return Ok(CacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        Ok(meta)
    }

    fn save_meta(&self, meta: &CacheMeta) -> Result<(), SourceError> {
        fs::create_dir_all(&self.root)?;
        let contents = serde_json::to_string_pretty(meta)?;
        fs::write(self.meta_path(), contents)?;
        Ok(())
    }

    /// Record a downloaded body under `name`.
    pub fn store(&self, name: &str, url: &str, bytes: &[u8]) -> Result<PathBuf, SourceError> {
        let path = self.source_path(name);
        fs::create_dir_all(self.sources_dir())?;
        fs::write(&path, bytes)?;

        let mut meta = self.load_meta()?;
        meta.version = CACHE_VERSION;
        meta.sources.insert(
            name.to_string(),
            CachedSource {
                url: url.to_string(),
                downloaded: chrono::Utc::now().to_rfc3339(),
                file_size: bytes.len() as u64,
            },
        );
        self.save_meta(&meta)?;
        Ok(path)
    }

    /// Download `url` and cache it as `name`.
    pub fn fetch(&self, name: &str, url: &str) -> Result<PathBuf, SourceError> {
        let bytes = download(url)?;
        log::debug!("Downloaded {} bytes from {url}", bytes.len());
        self.store(name, url, &bytes)
    }

    /// Path of a cached source still valid for `url`, if any.
    pub fn cached(&self, name: &str, url: &str) -> Result<Option<PathBuf>, SourceError> {
        let meta = self.load_meta()?;
        let path = self.source_path(name);
        let valid = meta
            .sources
            .get(name)
            .is_some_and(|cached| cached.url == url)
            && path.exists();
        Ok(valid.then_some(path))
    }

    /// Return the cached copy of `url`, downloading it when missing, stale,
    /// or when `refresh` is set.
    pub fn load_or_fetch(
        &self,
        name: &str,
        url: &str,
        refresh: bool,
    ) -> Result<PathBuf, SourceError> {
        if !refresh {
            if let Some(path) = self.cached(name, url)? {
                log::debug!("Using cached {name}");
                return Ok(path);
            }
        }
        self.fetch(name, url)
    }

    /// List all cached sources, sorted by name.
    pub fn list(&self) -> Result<Vec<CacheEntry>, SourceError> {
        let meta = self.load_meta()?;
        Ok(meta
            .sources
            .into_iter()
            .map(|(name, cached)| CacheEntry {
                name,
                url: cached.url,
                file_size: cached.file_size,
                downloaded: cached.downloaded,
            })
            .collect())
    }

    /// Remove all cached sources and the metadata file. Returns bytes freed.
    pub fn clear(&self) -> Result<u64, SourceError> {
        let mut total_size = 0u64;

        let dir = self.sources_dir();
        if dir.exists() {
            for entry in fs::read_dir(&dir)?.flatten() {
                let path = entry.path();
                if path.is_file() {
                    if let Ok(meta) = fs::metadata(&path) {
                        total_size += meta.len();
                    }
                    fs::remove_file(&path)?;
                }
            }
        }

        let meta = self.meta_path();
        if meta.exists() {
            if let Ok(m) = fs::metadata(&meta) {
                total_size += m.len();
            }
            fs::remove_file(&meta)?;
        }

        Ok(total_size)
    }
}

/// Fetch a URL body. Any transport failure or non-success status is a
/// `Download` error.
pub fn download(url: &str) -> Result<Vec<u8>, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SourceError::download(format!("{url}: {e}")))?;

    let mut request = client.get(url);
    if url.starts_with(GITHUB_API_HOST) {
        request = request.header(reqwest::header::ACCEPT, GITHUB_ACCEPT);
    }

    let response = request.send().map_err(|e| {
        log::warn!("Failed to download {url}: {e}");
        SourceError::download(format!("{url}: {e}"))
    })?;

    if !response.status().is_success() {
        log::warn!("HTTP {} for {url}", response.status());
        return Err(SourceError::download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| SourceError::download(format!("Failed to read response for {url}: {e}")))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
