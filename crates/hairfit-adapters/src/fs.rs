//! Filesystem adapter for locating landmark documents.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported landmark document extensions.
const LANDMARK_EXTENSIONS: &[&str] = &["json"];

/// Filesystem source of landmark documents.
pub struct FsLandmarkSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsLandmarkSource {
    /// Creates a new filesystem landmark source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all landmark documents from the configured paths, sorted
    /// within each directory.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_landmark_document(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        debug!("Found {} landmark documents", files.len());
        files
    }

    /// Returns the number of documents found.
    #[must_use]
    pub fn count_hint(&self) -> Option<usize> {
        Some(self.files().len())
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_landmark_document(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

/// Checks if a path has a supported landmark document extension.
fn is_landmark_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| LANDMARK_EXTENSIONS.contains(&e.as_str()))
}
