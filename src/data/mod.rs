//! Data loading.
//!
//! Reads the portfolio document from its fixed location. Loading is
//! all-or-nothing: an unreadable file and malformed JSON are reported the
//! same way to the reader of the page (see [`ERROR_MESSAGE`]), while the
//! typed [`LoadError`] keeps the cause for the log.

mod types;

pub use types::{About, MiscCategory, Portfolio, Profile, Project, Publication, RedirectLink, Social};

use std::{fs, io, path::{Path, PathBuf}};
use thiserror::Error;

/// The only message a visitor sees when the document cannot be loaded.
pub const ERROR_MESSAGE: &str =
    "Error loading content. Please ensure local server is running and data.json exists.";

/// Document unavailable or unparsable.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{0}`")]
    Unavailable(PathBuf, #[source] io::Error),

    #[error("failed to parse `{0}`")]
    Malformed(PathBuf, #[source] serde_json::Error),
}

/// Read and parse the document at `path`.
pub fn load_document(path: &Path) -> Result<Portfolio, LoadError> {
    let content =
        fs::read_to_string(path).map_err(|err| LoadError::Unavailable(path.to_path_buf(), err))?;
    serde_json::from_str(&content).map_err(|err| LoadError::Malformed(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"profile": {"name": "Ada Lovelace"}}"#).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.profile.unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn test_missing_document_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("data.json")).unwrap_err();

        assert!(matches!(err, LoadError::Unavailable(..)));
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"profile": "#).unwrap();

        assert!(matches!(load_document(&path), Err(LoadError::Malformed(..))));
    }

    #[test]
    fn test_null_sections_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"profile": {"name": "Ada", "image": null}, "projects": null, "socials": null}"#)
            .unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.profile.unwrap().image, "");
        assert!(doc.projects.is_empty());
        assert!(doc.socials.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"projects": {"title": "not a list"}}"#).unwrap();

        assert!(matches!(load_document(&path), Err(LoadError::Malformed(..))));
    }
}
