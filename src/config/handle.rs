//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so the
//! watcher can hot-reload `folio.toml` while rayon workers keep reading the
//! config they started with.
//!
//! ```text
//!   build workers ──► cfg()            (lock-free load)
//!   watcher       ──► reload_config()  (atomic replace)
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use rustc_hash::FxHasher;
use std::{
    fs,
    hash::{Hash, Hasher},
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

// =============================================================================
// Global State
// =============================================================================

/// Initialized with the default config, replaced with the loaded one in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content behind [`CONFIG`].
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

fn content_hash(content: &str) -> u64 {
    let mut hasher = FxHasher::default();
    content.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Re-read `folio.toml` and swap it in.
///
/// Returns `false` when the file content is unchanged since the last load.
pub fn reload_config() -> anyhow::Result<bool> {
    let c = cfg();
    let Some(cli) = c.cli else {
        anyhow::bail!("config was initialized without CLI arguments");
    };

    let content = fs::read_to_string(&c.config_path)?;
    let new_hash = content_hash(&content);
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;
    new_config.validate()?;

    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(content_hash(&content), Ordering::Relaxed);
    }

    CONFIG.store(Arc::new(config));
}
