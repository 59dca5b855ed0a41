//! On-disk recipe cache keyed by exact dish name.

use super::RecipeRecord;
use crate::error::{Result, SousChefError};
use crate::lock::{FileLock, LOCK_TIMEOUT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The current cache file version
pub const CACHE_VERSION: u32 = 1;

/// Longest encoded name used verbatim as a file stem. Most filesystems cap a
/// name at 255 bytes.
const MAX_KEY_BYTES: usize = 120;

/// Encoded prefix kept in front of the hash when a key is shortened
const KEY_PREFIX_BYTES: usize = 96;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRecipe {
    pub version: u32,
    pub cached_at: DateTime<Utc>,
    pub recipe: RecipeRecord,
}

/// One JSON file per dish under `dir`. Entries are never evicted and a later
/// save for the same name replaces the earlier one.
#[derive(Debug, Clone)]
pub struct RecipeCache {
    dir: PathBuf,
}

impl RecipeCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RecipeCache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `dish_name`
    pub fn path_for(&self, dish_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(dish_name)))
    }

    /// Load a cached recipe. Unreadable entries count as misses.
    pub fn load(&self, dish_name: &str) -> Option<RecipeRecord> {
        let path = self.path_for(dish_name);
        if !path.exists() {
            return None;
        }

        let cached = match read_entry(&path) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable cache entry");
                return None;
            }
        };

        // Case-insensitive filesystems can map two names onto one file
        if cached.recipe.dish_name != dish_name {
            debug!(
                requested = dish_name,
                stored = %cached.recipe.dish_name,
                "Cache entry belongs to a different dish name"
            );
            return None;
        }

        debug!(dish = dish_name, "Recipe cache hit");
        Some(cached.recipe)
    }

    /// Store a recipe under its dish name
    pub fn save(&self, record: &RecipeRecord) -> Result<()> {
        let path = self.path_for(&record.dish_name);
        let _lock = FileLock::acquire(&path, LOCK_TIMEOUT)?;

        let cached = CachedRecipe {
            version: CACHE_VERSION,
            cached_at: Utc::now(),
            recipe: record.clone(),
        };
        let content = serde_json::to_string_pretty(&cached)?;
        fs::write(&path, content)?;

        debug!(dish = %record.dish_name, path = %path.display(), "Saved recipe to cache");
        Ok(())
    }

    /// [`load`](Self::load) on the blocking pool
    pub async fn load_async(&self, dish_name: &str) -> Result<Option<RecipeRecord>> {
        let cache = self.clone();
        let dish_name = dish_name.to_string();
        tokio::task::spawn_blocking(move || cache.load(&dish_name))
            .await
            .map_err(|e| SousChefError::Task(format!("Cache read join error: {}", e)))
    }

    /// [`save`](Self::save) on the blocking pool, since taking the lock may
    /// sleep
    pub async fn save_async(&self, record: &RecipeRecord) -> Result<()> {
        let cache = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || cache.save(&record))
            .await
            .map_err(|e| SousChefError::Task(format!("Cache write join error: {}", e)))?
    }

    /// All readable entries, sorted by dish name
    pub fn list(&self) -> Result<Vec<CachedRecipe>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_entry(&path) {
                Ok(cached) => entries.push(cached),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable cache entry");
                }
            }
        }

        entries.sort_by(|a, b| a.recipe.dish_name.cmp(&b.recipe.dish_name));
        Ok(entries)
    }

    /// Delete the entry for `dish_name`, returning whether it existed
    pub fn remove(&self, dish_name: &str) -> Result<bool> {
        let path = self.path_for(dish_name);
        if !path.exists() {
            return Ok(false);
        }
        let _lock = FileLock::acquire(&path, LOCK_TIMEOUT)?;
        fs::remove_file(&path)?;
        Ok(true)
    }
}

fn read_entry(path: &Path) -> Result<CachedRecipe> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Filesystem-safe encoding of a dish name. Long encodings keep a readable
/// prefix and end in a SHA-256 of the full name, so the stem stays well
/// under the filesystem's name limit.
fn cache_key(dish_name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(dish_name.as_bytes()).collect();
    if encoded.len() <= MAX_KEY_BYTES {
        return encoded;
    }

    let mut hasher = Sha256::new();
    hasher.update(dish_name.as_bytes());
    let digest = hex::encode(hasher.finalize());

    // The encoding is pure ASCII, so any byte offset is a char boundary
    format!("{}~{}", &encoded[..KEY_PREFIX_BYTES], digest)
}
