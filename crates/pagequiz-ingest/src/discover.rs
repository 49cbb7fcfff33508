//! Topic directory scanning.

use std::path::{Path, PathBuf};

use crate::error::IngestError;

/// File extensions accepted as page images, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "heif"];

/// Whether `path` has a supported image extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// List the supported images directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. An empty result is not an error
/// here; the caller decides how to report it.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let read_dir = |source| IngestError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir)? {
        let path = entry.map_err(read_dir)?.path();
        if path.is_file() && is_supported(&path) {
            images.push(path);
        }
    }

    images.sort();
    images.dedup();
    tracing::debug!(dir = %dir.display(), count = images.len(), "discovered page images");

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "b.png");
        touch(&dir, "c.heic");
        touch(&dir, "a.jpg");

        let images = discover_images(dir.path()).unwrap();
        assert_eq!(names(&images), vec!["a.jpg", "b.png", "c.heic"]);
    }

    #[test]
    fn extensions_are_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "page1.JPG");
        touch(&dir, "page2.Png");
        touch(&dir, "page3.HEIF");
        touch(&dir, "page4.webp");
        touch(&dir, "page5.gif");
        touch(&dir, "page6.jpeg");

        let images = discover_images(dir.path()).unwrap();
        assert_eq!(images.len(), 6);
    }

    #[test]
    fn unsupported_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "notes.txt");
        touch(&dir, "scan.pdf");
        touch(&dir, "raw.tiff");
        touch(&dir, "README");

        let images = discover_images(dir.path()).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn subdirectories_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        touch(&dir, "page.png");

        let images = discover_images(dir.path()).unwrap();
        assert_eq!(names(&images), vec!["page.png"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_images(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IngestError::ReadDir { .. }));
    }

    #[test]
    fn supported_extension_check() {
        assert!(is_supported(Path::new("a/b/page.JPEG")));
        assert!(!is_supported(Path::new("page")));
        assert!(!is_supported(Path::new("page.bmp")));
    }
}
