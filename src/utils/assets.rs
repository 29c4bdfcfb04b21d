//! Static asset copying.
//!
//! Everything under `[build].assets` is mirrored into the output directory,
//! keeping its relative layout (`assets/me.jpg` → `public/assets/me.jpg`).

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if destination is up-to-date compared to source.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let Ok(src_time) = src.metadata().and_then(|m| m.modified()) else {
        return false;
    };
    let Ok(dst_time) = dst.metadata().and_then(|m| m.modified()) else {
        return false;
    };

    src_time <= dst_time
}

/// Copy every asset under `assets` into `output/<assets dir name>/`.
///
/// Returns the number of files actually copied (up-to-date files are skipped).
pub fn copy_assets(assets: &Path, output: &Path) -> Result<usize> {
    if !assets.is_dir() {
        return Ok(0);
    }

    let dir_name = assets.file_name().unwrap_or_default();
    let dest_root = output.join(dir_name);

    collect_all_files(assets)
        .par_iter()
        .map(|src| -> Result<usize> {
            let rel = src.strip_prefix(assets)?;
            let dest = dest_root.join(rel);
            if is_up_to_date(src, &dest) {
                return Ok(0);
            }
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, &dest)
                .with_context(|| format!("Failed to copy asset {}", src.display()))?;
            Ok(1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_assets_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let output = dir.path().join("public");
        fs::create_dir_all(assets.join("img")).unwrap();
        fs::write(assets.join("img/me.jpg"), b"jpg").unwrap();
        fs::write(assets.join("style.css"), b"body{}").unwrap();
        fs::write(assets.join(".DS_Store"), b"").unwrap();

        let copied = copy_assets(&assets, &output).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read(output.join("assets/img/me.jpg")).unwrap(), b"jpg");
        assert!(output.join("assets/style.css").is_file());
        assert!(!output.join("assets/.DS_Store").exists());
    }

    #[test]
    fn test_copy_assets_skips_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let output = dir.path().join("public");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("a.txt"), b"a").unwrap();

        assert_eq!(copy_assets(&assets, &output).unwrap(), 1);
        assert_eq!(copy_assets(&assets, &output).unwrap(), 0);
    }

    #[test]
    fn test_copy_assets_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_assets(&dir.path().join("nope"), &dir.path().join("public")).unwrap();
        assert_eq!(copied, 0);
    }
}
