//! Cache manager for persisting feed snapshots to disk
//!
//! Provides a `CacheManager` that stores serializable data as one JSON file per
//! key, together with the moment the data was requested. Freshness is decided by
//! the reader, so one entry can be judged against different windows.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the request that produced the data was issued
    cached_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache age
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally requested
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Age of the entry relative to `now`. Entries stamped in the future count as brand new.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.cached_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// Whether the entry is younger than `window` at `now`
    pub fn is_fresh_at(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.age_at(now) < window
    }

    /// Whether the entry is younger than `window` right now
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.is_fresh_at(window, Utc::now())
    }
}

/// Manages reading and writing cached data to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache directory
/// (`~/.cache/orbitx/` on Linux). There is no locking: two processes writing the
/// same key race and the last write wins.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "orbitx")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache stamped with `cached_at`
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "exoplanets")
    /// * `data` - The data to cache
    /// * `cached_at` - When the request producing `data` was issued
    pub fn write_at<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        cached_at: DateTime<Utc>,
    ) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry { data, cached_at };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Writes data to the cache stamped with the current time
    pub fn write<T: Serialize>(&self, key: &str, data: &T) -> std::io::Result<()> {
        self.write_at(key, data, Utc::now())
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the entry doesn't exist or cannot be parsed; a corrupt
    /// entry behaves exactly like a missing one.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(path).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    fn sample(name: &str, value: i32) -> TestData {
        TestData {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_write_creates_file_in_cache_directory() {
        let (cache, temp_dir) = create_test_cache();

        cache.write("exoplanets", &sample("test", 42)).expect("Write should succeed");

        let expected_path = temp_dir.path().join("exoplanets.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"cached_at\""));
        assert!(content.contains("\"test\""));
        assert!(content.contains("42"));
    }

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let (cache, _temp_dir) = create_test_cache();

        let result: Option<CachedData<TestData>> = cache.read("nonexistent_key");

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_read_treats_corrupt_entry_as_missing() {
        let (cache, temp_dir) = create_test_cache();
        fs::write(temp_dir.path().join("broken.json"), "{not json").unwrap();

        let result: Option<CachedData<TestData>> = cache.read("broken");

        assert!(result.is_none());
    }

    #[test]
    fn test_fresh_entry_within_window() {
        let (cache, _temp_dir) = create_test_cache();
        cache.write("fresh_key", &sample("fresh", 100)).unwrap();

        let result: CachedData<TestData> = cache.read("fresh_key").expect("Should read fresh cache");

        assert_eq!(result.data, sample("fresh", 100));
        assert!(result.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_old_entry_outside_window() {
        let (cache, _temp_dir) = create_test_cache();
        let issued = Utc::now() - chrono::Duration::minutes(11);
        cache.write_at("old_key", &sample("old", 0), issued).unwrap();

        let result: CachedData<TestData> = cache.read("old_key").expect("Should read old cache");

        assert_eq!(result.data, sample("old", 0));
        assert!(!result.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_window_is_never_fresh() {
        let (cache, _temp_dir) = create_test_cache();
        cache.write("k", &sample("x", 1)).unwrap();

        let result: CachedData<TestData> = cache.read("k").unwrap();

        assert!(!result.is_fresh(Duration::ZERO));
    }

    #[test]
    fn test_future_timestamp_counts_as_new() {
        let entry = CachedData {
            data: (),
            cached_at: Utc::now() + chrono::Duration::minutes(5),
        };
        assert_eq!(entry.age_at(Utc::now()), Duration::ZERO);
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let cache = CacheManager::with_dir(nested_path.clone());

        cache.write("nested_key", &sample("nested", 1)).expect("Write should succeed");

        assert!(nested_path.join("nested_key.json").exists(), "Cache file should exist");
    }

    #[test]
    fn test_cached_at_timestamp_is_recorded() {
        let (cache, _temp_dir) = create_test_cache();

        let before = Utc::now();
        cache.write("timestamp_key", &sample("timestamp", 999)).unwrap();
        let after = Utc::now();

        let result: CachedData<TestData> = cache.read("timestamp_key").expect("Should read cache");

        assert!(result.cached_at >= before);
        assert!(result.cached_at <= after);
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = CacheManager::new() {
            let path_str = cache.cache_dir.to_string_lossy();
            assert!(path_str.contains("orbitx"), "Cache path should contain project name");
        }
        // Passes if new() returns None (e.g., no home directory in CI)
    }

    #[test]
    fn test_overwrite_existing_cache_last_write_wins() {
        let (cache, _temp_dir) = create_test_cache();

        cache.write("overwrite_key", &sample("first", 1)).unwrap();
        cache.write("overwrite_key", &sample("second", 2)).unwrap();

        let result: CachedData<TestData> = cache.read("overwrite_key").unwrap();

        assert_eq!(result.data, sample("second", 2));
    }
}
