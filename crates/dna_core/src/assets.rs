//! Path-keyed cache for decoded assets.
//!
//! Generic over the decoded type; the game only instantiates it for images
//! (`dna_game::assets::ImageLibrary`). No sound type is wired up because no
//! screen plays audio.
//!
//! Everything is loaded relative to one root directory. Entries are never
//! evicted; the game's asset set is a handful of images, so the cache just
//! grows until exit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

pub const DEFAULT_ASSET_ROOT: &str = "game_data";

pub struct AssetCache<T> {
    root: PathBuf,
    entries: HashMap<String, Arc<T>>,
}

impl<T> AssetCache<T> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `relative` under the asset root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Return the cached asset for `relative`, loading it with `loader` on
    /// first use. A failed load is not cached, so a later call retries.
    pub fn get_or_load<F>(&mut self, relative: &str, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce(&Path) -> std::result::Result<T, String>,
    {
        if let Some(asset) = self.entries.get(relative) {
            return Ok(Arc::clone(asset));
        }
        let path = self.resolve(relative);
        let asset = loader(&path).map_err(|reason| Error::Asset {
            path: path.clone(),
            reason,
        })?;
        log::debug!("Cached asset {}", path.display());
        let asset = Arc::new(asset);
        self.entries.insert(relative.to_string(), Arc::clone(&asset));
        Ok(asset)
    }

    pub fn get(&self, relative: &str) -> Option<Arc<T>> {
        self.entries.get(relative).cloned()
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.entries.contains_key(relative)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn loads_once_per_path() {
        let mut cache: AssetCache<String> = AssetCache::new("game_data");
        let calls = Cell::new(0);
        let loader = |path: &Path| {
            calls.set(calls.get() + 1);
            Ok(path.display().to_string())
        };

        let first = cache.get_or_load("sfx/click.wav", loader).expect("loads");
        let second = cache.get_or_load("sfx/click.wav", loader).expect("cached");
        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.ends_with("click.wav"));
        assert!(first.starts_with("game_data"));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let mut cache: AssetCache<u32> = AssetCache::new("game_data");
        let err = cache
            .get_or_load("missing.png", |_| Err("not found".to_string()))
            .expect_err("loader fails");
        assert!(matches!(err, Error::Asset { .. }));
        assert!(!cache.contains("missing.png"));

        let value = cache.get_or_load("missing.png", |_| Ok(7)).expect("retry");
        assert_eq!(*value, 7);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn resolve_joins_root() {
        let cache: AssetCache<()> = AssetCache::new("assets");
        assert_eq!(
            cache.resolve("game_intro/logo_title.png"),
            Path::new("assets").join("game_intro/logo_title.png")
        );
    }
}
