//! Landmark provider backed by JSON landmark documents.

use std::path::Path;

use anyhow::{Context, Result};
use hairfit_core::{LandmarkProvider, LandmarkSet};
use tracing::debug;

use crate::document::LandmarkDocument;

/// Reads the faces of an image from a JSON landmark document.
///
/// The document is produced by an external detector ahead of time; the
/// path passed to [`LandmarkProvider::detect`] is the document itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLandmarkProvider;

impl JsonLandmarkProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LandmarkProvider for JsonLandmarkProvider {
    async fn detect(&self, image: &Path) -> Result<Vec<LandmarkSet>> {
        let json = tokio::fs::read_to_string(image)
            .await
            .with_context(|| format!("Failed to read landmark document: {}", image.display()))?;

        let faces = LandmarkDocument::parse(&json)
            .and_then(LandmarkDocument::into_landmark_sets)
            .with_context(|| format!("Failed to load landmarks from {}", image.display()))?;

        debug!("Loaded {} face(s) from {}", faces.len(), image.display());
        Ok(faces)
    }
}
