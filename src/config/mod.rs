//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[base]`     | Page metadata (title, language, credit)        |
//! | `[build]`    | Data document, output paths, icons, trust      |
//! | `[effects]`  | Typewriter timing and fade-in observer         |
//! | `[serve]`    | Development server (port, interface, watch)    |
//!
//! The config file is optional: without one every field takes its default.
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Ada Lovelace"
//!
//! [build]
//! data = "data.json"
//! output = "public"
//! minify = true
//!
//! [effects.typewriter]
//! interval_ms = 80
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod effects;
mod error;
mod handle;
mod serve;

pub use build::IconMode;
pub use effects::{EffectsConfig, ObserverConfig, TypewriterConfig};
pub use handle::{cfg, init_config, reload_config};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::Result;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Page metadata
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Effect timings and class names
    #[serde(default)]
    pub effects: EffectsConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, merge CLI overrides and validate.
    ///
    /// `init` never reads an existing file: it is about to write one.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if !cli.is_init() && config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.trust_about_html, args.trust_html.as_ref());
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<(), ConfigError> {
        let observer = &self.effects.observer;
        if !(0.0..=1.0).contains(&observer.threshold) {
            return Err(ConfigError::Threshold(observer.threshold));
        }
        if observer.root_margin_px().is_none() {
            return Err(ConfigError::RootMargin(observer.root_margin.clone()));
        }

        for (field, class) in [
            ("[effects.observer.marker_class]", &observer.marker_class),
            ("[effects.observer.visible_class]", &observer.visible_class),
        ] {
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(ConfigError::ClassName {
                    field,
                    value: class.clone(),
                });
            }
        }

        if self.effects.typewriter.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        if self.build.output == self.get_root() {
            return Err(ConfigError::OutputIsRoot(self.build.output.clone()));
        }

        self.serve.validate()?;

        if let Some(cli) = self.cli
            && cli.is_init()
            && self.config_path.exists()
        {
            return Err(ConfigError::AlreadyExists(self.config_path.clone()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str("[base]\ntitle = \"Me\"").unwrap();
        assert_eq!(config.base.title, "Me");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[base\ntitle = ").is_err());
    }

    #[test]
    fn test_unknown_top_level_section() {
        assert!(SiteConfig::from_str("[deploy]\nprovider = \"github\"").is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "--data", "me.json", "build", "--minify", "false"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.data, root.join("me.json"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.config_path, root.join("folio.toml"));
        assert!(!config.build.minify);
    }

    #[test]
    fn test_update_with_cli_serve_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "serve", "-i", "0.0.0.0", "-p", "9000", "-w", "false"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 9000);
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_init_name_joins_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "init", "site"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        let expected = dir.path().canonicalize().unwrap().join("site");
        assert_eq!(config.get_root(), expected);
        assert_eq!(config.build.data, expected.join("data.json"));
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("folio.toml"), "[base]\ntitle = \"From File\"").unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "build"]);

        let config = SiteConfig::load(cli).unwrap();
        assert_eq!(config.base.title, "From File");
    }

    #[test]
    fn test_load_without_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "build"]);

        let config = SiteConfig::load(cli).unwrap();
        assert_eq!(config.base.title, "Portfolio");
    }

    #[test]
    fn test_init_rejects_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("folio.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "init"]);

        let err = SiteConfig::load(cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = SiteConfig::default();
        config.effects.observer.threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Threshold(_))));

        config.effects.observer.threshold = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_class_names() {
        let mut config = SiteConfig::default();
        config.effects.observer.visible_class = "is visible".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ClassName { field: "[effects.observer.visible_class]", .. })
        ));

        config.effects.observer.visible_class = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_root_margin_must_be_px() {
        let mut config = SiteConfig::default();
        config.effects.observer.root_margin = "10%".into();
        assert!(matches!(config.validate(), Err(ConfigError::RootMargin(m)) if m == "10%"));

        config.effects.observer.root_margin = "-20px".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_serve_section() {
        let mut config = SiteConfig::default();
        config.serve.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPort)));

        config.serve.port = 8080;
        config.serve.interface = "my-laptop".into();
        assert!(matches!(config.validate(), Err(ConfigError::Interface(..))));
    }

    #[test]
    fn test_load_rejects_bad_serve_override() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["folio", "--root", root, "serve", "-p", "0"]);

        assert!(SiteConfig::load(cli).is_err());
    }

    #[test]
    fn test_validate_output_is_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.set_root(dir.path());
        config.build.output = dir.path().to_path_buf();
        assert!(matches!(config.validate(), Err(ConfigError::OutputIsRoot(_))));
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = SiteConfig::default();
        config.effects.typewriter.interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let content = toml::to_string_pretty(&SiteConfig::default()).unwrap();
        let parsed = SiteConfig::from_str(&content).unwrap();
        assert_eq!(parsed.build.icons, IconMode::Inline);
        assert_eq!(parsed.serve.port, 5277);
    }
}
