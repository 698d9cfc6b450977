//! JSON landmark documents.
//!
//! A document lists the faces found in one image, in detector order:
//!
//! ```json
//! { "faces": [ { "jaw_outline": [{"x": 1.0, "y": 2.0}, ...], "left_eye": [...], ... } ] }
//! ```
//!
//! A face may instead be a flat iBUG 68-point annotation:
//! `{ "points": [{"x": .., "y": ..}, ...] }`.

use anyhow::{Context, Result};
use hairfit_core::{LandmarkSet, Point};
use serde::{Deserialize, Serialize};

/// Landmarks for every face detected in one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkDocument {
    /// Source image, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Detected faces, in detector order.
    #[serde(default)]
    pub faces: Vec<FaceEntry>,
}

/// One face, either grouped or as a flat 68-point annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceEntry {
    Points { points: Vec<Point> },
    Grouped(LandmarkSet),
}

impl LandmarkDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a landmark document.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid landmark document")
    }

    /// Builds a document from grouped landmark sets.
    #[must_use]
    pub fn from_faces(faces: Vec<LandmarkSet>) -> Self {
        Self {
            image: None,
            faces: faces.into_iter().map(FaceEntry::Grouped).collect(),
        }
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize landmark document")
    }

    /// Converts every face to a landmark set, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if a flat annotation does not have 68 points.
    pub fn into_landmark_sets(self) -> Result<Vec<LandmarkSet>> {
        self.faces
            .into_iter()
            .enumerate()
            .map(|(i, face)| match face {
                FaceEntry::Grouped(set) => Ok(set),
                FaceEntry::Points { points } => LandmarkSet::from_68_points(&points)
                    .with_context(|| format!("face {i} is not a 68-point annotation")),
            })
            .collect()
    }
}
