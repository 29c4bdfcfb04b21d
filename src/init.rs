//! Site initialization module.
//!
//! Creates a new portfolio with default configuration and a sample document.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Sample document (embedded at compile time)
const SAMPLE_DATA: &str = include_str!("embed/init/data.json");

/// Create a new portfolio with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(config)?;
    init_default_config(&config.config_path)?;
    init_sample_data(&config.build.data)?;
    init_ignored_files(root, &[config.build.output.as_path()])?;

    log!("init"; "created portfolio in {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn init_sample_data(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("`{}` already exists.", path.display());
    }
    fs::write(path, SAMPLE_DATA).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Create the root and assets directories
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    for path in [config.get_root(), config.build.assets.as_path()] {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}/"))
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_document;

    fn config_in(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("folio.toml");
        config.build.data = root.join("data.json");
        config.build.output = root.join("public");
        config.build.assets = root.join("assets");
        config
    }

    #[test]
    fn test_new_site_creates_structure() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        let config = config_in(&root);

        new_site(&config, true).unwrap();

        assert!(root.join("assets").is_dir());
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "/public/");

        let written = SiteConfig::from_path(&root.join("folio.toml")).unwrap();
        assert_eq!(written.serve.port, SiteConfig::default().serve.port);

        let doc = load_document(&root.join("data.json")).unwrap();
        assert_eq!(doc.profile.unwrap().name, "Ada Lovelace");
        assert_eq!(doc.publications[0].year, "1843");
    }

    #[test]
    fn test_new_site_refuses_non_empty_dir_without_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let err = new_site(&config_in(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_new_site_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        new_site(&config_in(dir.path()), false).unwrap();
        assert!(dir.path().join("data.json").is_file());
    }
}
