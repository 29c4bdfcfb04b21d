//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `folio.toml` while `serve` is watching.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use crate::utils::hash;
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

// =============================================================================
// Global State
// =============================================================================

/// Global config storage with atomic replacement support.
///
/// Initialized with default config, then replaced with loaded config in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content last loaded (0 when there is no file).
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
///
/// Lock-free read via atomic load.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Replace config atomically (called when folio.toml changes).
///
/// Returns `true` if config was actually updated, `false` if content matches last load.
///
/// # Errors
///
/// Returns error if folio.toml cannot be read or parsed. The previous config stays active.
pub fn reload_config() -> anyhow::Result<bool> {
    let c = cfg();
    let Some(cli) = c.cli else {
        anyhow::bail!("config reloaded before initialization");
    };

    let content = fs::read_to_string(&c.config_path)?;
    let new_hash = hash::compute(content.as_bytes());
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;

    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(hash::compute(content.as_bytes()), Ordering::Relaxed);
    }

    CONFIG.store(Arc::new(config));
}
