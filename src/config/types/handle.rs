//! Config handle with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! Readers holding an old `Arc<SiteConfig>` keep a consistent snapshot
//! for the rest of their build cycle.

use crate::config::SiteConfig;
use anyhow::Result;
use arc_swap::ArcSwap;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct ConfigHandle {
    current: ArcSwap<SiteConfig>,
    /// Hash of the config file content last loaded (0 = not from a file)
    hash: AtomicU64,
}

impl ConfigHandle {
    pub fn new(config: SiteConfig) -> Self {
        let hash = read_hash(&config).unwrap_or(0);
        Self {
            current: ArcSwap::from_pointee(config),
            hash: AtomicU64::new(hash),
        }
    }

    #[inline]
    pub fn load(&self) -> Arc<SiteConfig> {
        self.current.load_full()
    }

    /// Replace the config wholesale.
    pub fn store(&self, config: SiteConfig) {
        self.hash.store(read_hash(&config).unwrap_or(0), Ordering::Relaxed);
        self.current.store(Arc::new(config));
    }

    /// Reload config from disk if content changed.
    ///
    /// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
    pub fn reload(&self) -> Result<bool> {
        let path = self.load().config_path.clone();
        let content = std::fs::read_to_string(&path)?;
        let new_hash = hash_content(&content);

        if new_hash == self.hash.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let config = SiteConfig::from_path(&path)?;
        crate::log!("config"; "reloaded {}", path.display());
        self.current.store(Arc::new(config));
        self.hash.store(new_hash, Ordering::Relaxed);
        Ok(true)
    }
}

fn read_hash(config: &SiteConfig) -> Option<u64> {
    std::fs::read_to_string(&config.config_path)
        .ok()
        .map(|content| hash_content(&content))
}

fn hash_content(content: &str) -> u64 {
    let mut hasher = FxHasher::default();
    content.hash(&mut hasher);
    hasher.finish()
}
