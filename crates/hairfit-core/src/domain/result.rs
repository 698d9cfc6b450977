//! Per-input classification records.

use serde::{Deserialize, Serialize};

use super::FaceShape;
use crate::classifier::{Analysis, Decision, Measurements, ScoreTable};

/// Outcome category for one input.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// A face shape was determined.
    Classified,
    /// The landmark provider reported no face.
    NoFace,
    /// Landmarks were present but could not be measured.
    InvalidLandmarks,
}

/// Classification result for a single input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Path of the analyzed input.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Outcome category.
    pub status: RecordStatus,
    /// Determined face shape, absent when no result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_shape: Option<FaceShape>,
    /// Recommended hairstyle ids, best first.
    pub recommendations: Vec<u8>,
    /// Why no face shape was determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Intermediate values, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Explanation>,
}

impl ClassificationRecord {
    /// Returns true if a face shape was determined.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        matches!(self.status, RecordStatus::Classified)
    }
}

/// Measurements, final scores and decision behind a classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub measurements: Measurements,
    pub scores: ScoreTable,
    pub decision: Decision,
}

impl From<&Analysis> for Explanation {
    fn from(analysis: &Analysis) -> Self {
        Self {
            measurements: analysis.measurements.clone(),
            scores: analysis.scores.clone(),
            decision: analysis.decision,
        }
    }
}
