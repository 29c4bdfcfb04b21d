//! File system watcher for live reload.
//!
//! Monitors the data document, the config file and the assets directory and
//! rebuilds the page when one of them changes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Event Loop                         │
//! │                                                         │
//! │  ┌──────────┐    ┌──────────┐    ┌───────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│ Rebuilder::handle │  │
//! │  │ events   │    │ (300ms)  │    │                   │  │
//! │  └──────────┘    └──────────┘    │  config → reload  │  │
//! │                                  │  data   → hash    │  │
//! │                                  │  assets → copy    │  │
//! │                                  └───────────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The data document and config are watched through their parent directory,
//! so editors that save by rename are still picked up.

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::WatchStatus,
    utils::hash,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// What a changed path means for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileCategory {
    Data,
    Config,
    Asset,
    Unknown,
}

fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    if path == config.build.data {
        FileCategory::Data
    } else if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.assets) {
        FileCategory::Asset
    } else {
        FileCategory::Unknown
    }
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Content hash of a file, 0 when unreadable.
fn file_hash(path: &Path) -> u64 {
    fs::read(path).map_or(0, |content| hash::compute(&content))
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Turns batches of changed paths into rebuilds.
struct Rebuilder {
    status: WatchStatus,
    /// Hash of the data document at the last build.
    data_hash: u64,
}

impl Rebuilder {
    fn new(config: &SiteConfig) -> Self {
        Self {
            status: WatchStatus::new(),
            data_hash: file_hash(&config.build.data),
        }
    }

    /// Process file changes. Returns true if a rebuild ran (for cooldown).
    fn handle(&mut self, paths: &[PathBuf]) -> bool {
        let config = cfg();
        let root = config.get_root();

        let mut config_changed = false;
        let mut data_changed = false;
        let mut assets: Vec<String> = Vec::new();

        for path in paths {
            match categorize_path(path, &config) {
                FileCategory::Config => config_changed = true,
                FileCategory::Data => data_changed = true,
                FileCategory::Asset => assets.push(rel_path(path, root)),
                FileCategory::Unknown => {}
            }
        }

        if config_changed {
            match reload_config() {
                Ok(true) => return self.rebuild("config changed"),
                Ok(false) => self.status.unchanged(&rel_path(&config.config_path, root)),
                Err(err) => {
                    self.status.failed("config reload", &err);
                    return false;
                }
            }
        }

        if data_changed {
            let new_hash = file_hash(&config.build.data);
            if new_hash == self.data_hash && assets.is_empty() {
                self.status.unchanged(&rel_path(&config.build.data, root));
                return false;
            }
            self.data_hash = new_hash;
            return self.rebuild(&rel_path(&config.build.data, root));
        }

        if !assets.is_empty() {
            return self.rebuild(&assets.join(", "));
        }

        false
    }

    fn rebuild(&mut self, trigger: &str) -> bool {
        let config = cfg();
        match build_site(&config) {
            Ok(()) => self.status.rebuilt(trigger),
            Err(err) => self.status.failed(&format!("rebuild after {trigger}"), &err),
        }
        self.data_hash = file_hash(&config.build.data);
        true
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to register, with their recursion mode.
fn watch_targets(config: &SiteConfig) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets: Vec<(PathBuf, RecursiveMode)> = Vec::new();
    for file in [&config.build.data, &config.config_path] {
        if let Some(parent) = file.parent()
            && parent.exists()
            && !targets.iter().any(|(p, _)| p == parent)
        {
            targets.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
        }
    }
    if config.build.assets.is_dir() {
        targets.push((config.build.assets.clone(), RecursiveMode::Recursive));
    }
    targets
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    for (path, mode) in watch_targets(config) {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    let root = config.get_root();
    let mut watched = vec![
        rel_path(&config.build.data, root),
        rel_path(&config.config_path, root),
    ];
    if config.build.assets.is_dir() {
        watched.push(format!("{}/", rel_path(&config.build.assets, root)));
    }
    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();
    let mut rebuilder = Rebuilder::new(&config);

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if rebuilder.handle(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}
