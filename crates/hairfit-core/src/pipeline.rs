//! Detect, classify, recommend: the per-input control flow.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::recommend;
use crate::classifier::FaceShapeClassifier;
use crate::domain::{ClassificationRecord, Explanation, RecordStatus};
use crate::ports::{first_face, LandmarkProvider};

/// Options for a single classification.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Attach measurements, scores and decision to the record.
    pub explain: bool,
    /// Timestamp recorded on the output (ISO 8601).
    pub timestamp: String,
}

/// Runs the full pipeline for one image.
///
/// A missing face or invalid landmarks produce a record without a face
/// shape; only provider failures are errors.
///
/// # Errors
///
/// Returns an error if the landmark provider fails.
pub async fn classify_image<P: LandmarkProvider>(
    provider: &P,
    classifier: &FaceShapeClassifier,
    image: &Path,
    options: &ClassifyOptions,
) -> Result<ClassificationRecord> {
    let path = image.to_string_lossy().into_owned();
    let faces = provider.detect(image).await?;
    debug!("Provider reported {} face(s) for {}", faces.len(), path);

    let mut record = ClassificationRecord {
        path,
        timestamp: options.timestamp.clone(),
        status: RecordStatus::NoFace,
        face_shape: None,
        recommendations: Vec::new(),
        reason: None,
        details: None,
    };

    let Some(landmarks) = first_face(faces) else {
        record.reason = Some("no face detected".to_string());
        return Ok(record);
    };

    match classifier.analyze(&landmarks) {
        Ok(analysis) => {
            info!("{}: {}", record.path, analysis.shape);
            record.status = RecordStatus::Classified;
            record.face_shape = Some(analysis.shape);
            record.recommendations = recommend(Some(analysis.shape)).to_vec();
            if options.explain {
                record.details = Some(Explanation::from(&analysis));
            }
        }
        Err(e) => {
            info!("{}: could not determine face shape: {e}", record.path);
            record.status = RecordStatus::InvalidLandmarks;
            record.reason = Some(e.to_string());
        }
    }

    Ok(record)
}
