//! Catalog sources: where the ordered list of [`ImageRecord`]s comes from.
//!
//! Two loaders, one contract: a deterministic, ordered `Vec<ImageRecord>`.
//!
//! - **Manifest**: a JSON array of `{name, path}` objects, in author order.
//!   Sparse entries are tolerated — absent fields deserialize to empty
//!   strings and classify into the catch-all category.
//! - **Directory scan**: walks an image directory and synthesizes records
//!   with paths relative to the scan root, sorted by file name so repeated
//!   scans of the same tree agree byte-for-byte.
//!
//! A missing source is not an error at this layer: the gallery degrades to
//! an empty index, never a crash. [`load`] encodes that policy; the
//! individual loaders stay strict for callers that want the error.

use crate::types::ImageRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("catalog source is neither a directory nor a .json manifest: {0}")]
    UnknownSource(PathBuf),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Load a catalog from `source`, degrading a missing source to an empty
/// catalog. A `.json` file is read as a manifest; a directory is scanned.
pub fn load(source: &Path) -> Result<Vec<ImageRecord>, CatalogError> {
    if !source.exists() {
        return Ok(Vec::new());
    }
    if source.is_dir() {
        return scan_dir(source);
    }
    if source.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        return load_manifest(source);
    }
    Err(CatalogError::UnknownSource(source.to_path_buf()))
}

/// Read an ordered JSON manifest: `[{"name": "...", "path": "..."}, ...]`.
pub fn load_manifest(path: &Path) -> Result<Vec<ImageRecord>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ImageRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Walk `root` and build records for every image file, paths relative to
/// `root` with forward slashes. Entries are visited in file-name order at
/// every level, so the catalog order is a function of the tree alone.
pub fn scan_dir(root: &Path) -> Result<Vec<ImageRecord>, CatalogError> {
    let mut records = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        records.push(ImageRecord::new(name, rel));
    }
    Ok(records)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn scan_is_ordered_and_relative() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("Urunler/tabela-isikli-1.jpg"));
        touch(&tmp.path().join("Urunler/arac-tam-1.jpg"));
        touch(&tmp.path().join("Slide/1.jpg"));
        touch(&tmp.path().join("hero.jpg"));
        touch(&tmp.path().join("notes.txt")); // not an image

        let catalog = scan_dir(tmp.path()).unwrap();
        let paths: Vec<&str> = catalog.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Slide/1.jpg",
                "Urunler/arac-tam-1.jpg",
                "Urunler/tabela-isikli-1.jpg",
                "hero.jpg",
            ]
        );
        assert_eq!(catalog[0].name, "1.jpg");
    }

    #[test]
    fn scan_twice_agrees() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(&tmp.path().join(format!("img/photo-{i}.jpg")));
        }
        assert_eq!(scan_dir(tmp.path()).unwrap(), scan_dir(tmp.path()).unwrap());
    }

    #[test]
    fn manifest_preserves_order_and_tolerates_sparse_entries() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("catalog.json");
        fs::write(
            &manifest,
            r#"[
                {"name": "b.jpg", "path": "img/b.jpg"},
                {"name": "a.jpg", "path": "img/a.jpg"},
                {"path": "img/orphan.jpg"},
                {}
            ]"#,
        )
        .unwrap();

        let catalog = load_manifest(&manifest).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[0].name, "b.jpg");
        assert_eq!(catalog[2].name, "");
        assert_eq!(catalog[3].path, "");
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("catalog.json");
        fs::write(&manifest, r#"{"not": "an array"}"#).unwrap();
        assert!(matches!(
            load_manifest(&manifest),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn missing_source_degrades_to_empty_catalog() {
        let catalog = load(Path::new("/nonexistent/catalog")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_dispatches_on_source_kind() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("x.jpg"));
        assert_eq!(load(tmp.path()).unwrap().len(), 1);

        let manifest = tmp.path().join("catalog.json");
        fs::write(&manifest, "[]").unwrap();
        assert!(load(&manifest).unwrap().is_empty());

        let stray = tmp.path().join("catalog.toml");
        fs::write(&stray, "").unwrap();
        assert!(matches!(
            load(&stray),
            Err(CatalogError::UnknownSource(_))
        ));
    }
}
