mod types;

pub use types::*;

use crate::error::{Result, SousChefError};
use crate::lock::{FileLock, LOCK_TIMEOUT};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-user shelves stored as `<dir>/<user_id>.json`
#[derive(Debug, Clone)]
pub struct ShelfStore {
    dir: PathBuf,
}

impl ShelfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ShelfStore { dir: dir.into() }
    }

    fn path_for(&self, user_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", user_id))
    }

    /// Load a shelf without locking (for read-only operations)
    pub fn load(&self, user_id: u64) -> Result<Shelf> {
        read_shelf(&self.path_for(user_id))
    }

    /// Add a dish to one of a user's lists. Returns false if already present.
    pub fn add(&self, user_id: u64, list: ShelfList, dish_name: &str) -> Result<bool> {
        let path = self.path_for(user_id);
        let _lock = FileLock::acquire(&path, LOCK_TIMEOUT)?;

        let mut shelf = read_shelf(&path)?;
        let added = shelf.add(list, dish_name);
        if added {
            let content = serde_json::to_string_pretty(&shelf)?;
            fs::write(&path, content)?;
        }
        Ok(added)
    }

    /// [`add`](Self::add) on the blocking pool
    pub async fn add_async(&self, user_id: u64, list: ShelfList, dish_name: &str) -> Result<bool> {
        let store = self.clone();
        let dish_name = dish_name.to_string();
        tokio::task::spawn_blocking(move || store.add(user_id, list, &dish_name))
            .await
            .map_err(|e| SousChefError::Task(format!("Shelf write join error: {}", e)))?
    }
}

fn read_shelf(path: &Path) -> Result<Shelf> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(Shelf::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_shelf_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ShelfStore::new(dir.path().join("shelves"));

        assert!(store.load(1).unwrap().is_empty());
        assert!(store.add(1, ShelfList::Favorites, "Paella").unwrap());
        assert!(!store.add(1, ShelfList::Favorites, "Paella").unwrap());
        assert!(store.add(2, ShelfList::Saved, "Paella").unwrap());

        let shelf = store.load(1).unwrap();
        assert_eq!(shelf.version, SHELF_VERSION);
        assert_eq!(shelf.favorites, vec!["Paella"]);
        assert!(shelf.saved.is_empty());
        assert_eq!(store.load(2).unwrap().saved, vec!["Paella"]);
    }

    #[tokio::test]
    async fn test_add_async() {
        let dir = tempdir().unwrap();
        let store = ShelfStore::new(dir.path());

        assert!(store.add_async(9, ShelfList::Liked, "Bibimbap").await.unwrap());
        assert!(!store.add_async(9, ShelfList::Liked, "Bibimbap").await.unwrap());
        assert_eq!(store.load(9).unwrap().liked, vec!["Bibimbap"]);
    }
}
