//! Landmark provider port for the external face/landmark detector.

use std::future::Future;
use std::path::Path;

use crate::domain::LandmarkSet;

/// Port for detecting facial landmarks in an image.
///
/// Detection may suspend on model loading and inference. Implementations
/// must tolerate repeated calls for the same image; callers do not cache.
pub trait LandmarkProvider: Send + Sync {
    /// Returns the landmark sets of every detected face, in provider order.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or inference fails.
    /// Finding no face is not an error.
    fn detect(
        &self,
        image: &Path,
    ) -> impl Future<Output = anyhow::Result<Vec<LandmarkSet>>> + Send;
}

/// Keeps only the first face in provider order.
///
/// Faces are not ranked by size or confidence.
#[must_use]
pub fn first_face(faces: Vec<LandmarkSet>) -> Option<LandmarkSet> {
    faces.into_iter().next()
}
