//! Rule-based face-shape classifier.
//!
//! Classification runs in four stages over a single landmark set:
//! - measurements derived from jaw, eye and mouth landmarks
//! - definitive overrides, which decide the shape before any scoring
//! - threshold-banded scoring rules followed by the chin-ratio gate
//! - winner selection with tie-break cascades for near ties
//!
//! The classifier is synchronous and keeps no state between calls.

mod decision;
mod measurements;
mod rules;
mod scores;

use tracing::debug;

pub use decision::Decision;
pub use measurements::Measurements;
pub use scores::ScoreTable;

use crate::domain::{FaceShape, InvalidLandmarks, LandmarkSet};
use scores::Tally;

/// Calibration constants for the measurements.
///
/// The defaults assume landmark coordinates roughly in source-image pixels.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Distance above the highest eye point taken as the forehead top.
    pub forehead_offset: f64,
    /// Eye span multiplier in the forehead width estimate.
    pub forehead_eye_factor: f64,
    /// Face width multiplier in the forehead width estimate.
    pub forehead_face_factor: f64,
    /// Face width multiplier for the upper face width.
    pub upper_face_factor: f64,
    /// Emit per-rule score events. Never changes the result.
    pub trace: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            forehead_offset: 20.0,
            forehead_eye_factor: 1.6,
            forehead_face_factor: 0.85,
            upper_face_factor: 0.9,
            trace: true,
        }
    }
}

impl ClassifierConfig {
    /// Sets the forehead offset.
    #[must_use]
    pub const fn with_forehead_offset(mut self, offset: f64) -> Self {
        self.forehead_offset = offset;
        self
    }

    /// Sets both forehead width blend factors.
    #[must_use]
    pub const fn with_forehead_factors(mut self, eye: f64, face: f64) -> Self {
        self.forehead_eye_factor = eye;
        self.forehead_face_factor = face;
        self
    }

    /// Sets the upper face width factor.
    #[must_use]
    pub const fn with_upper_face_factor(mut self, factor: f64) -> Self {
        self.upper_face_factor = factor;
        self
    }

    /// Enables or disables per-rule diagnostics.
    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Everything one classification computed.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub shape: FaceShape,
    pub measurements: Measurements,
    /// Final scores; a definitive table when an override fired.
    pub scores: ScoreTable,
    pub decision: Decision,
}

/// Maps a landmark set to one of the six face shapes.
#[derive(Debug, Clone, Default)]
pub struct FaceShapeClassifier {
    config: ClassifierConfig,
}

impl FaceShapeClassifier {
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a landmark set.
    ///
    /// Returns `None` when the landmarks are structurally invalid or
    /// geometrically degenerate.
    #[must_use]
    pub fn classify(&self, landmarks: &LandmarkSet) -> Option<FaceShape> {
        match self.analyze(landmarks) {
            Ok(analysis) => Some(analysis.shape),
            Err(e) => {
                debug!("No face shape: {e}");
                None
            }
        }
    }

    /// Classifies a landmark set and keeps the intermediate values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLandmarks`] when no measurement can be taken.
    pub fn analyze(&self, landmarks: &LandmarkSet) -> Result<Analysis, InvalidLandmarks> {
        let measurements = Measurements::derive(landmarks, &self.config)?;
        if self.config.trace {
            debug!(?measurements, "derived measurements");
        }

        if let Some((shape, decision)) = decision::definitive_override(&measurements) {
            return Ok(Analysis {
                shape,
                measurements,
                scores: ScoreTable::definitive(shape),
                decision,
            });
        }

        let mut tally = Tally::new(self.config.trace);
        rules::score(&measurements, &mut tally);

        decision::chin_gate(&measurements, &mut tally);
        let (shape, decision) = decision::select(tally.table(), &measurements);
        if self.config.trace {
            debug!(%shape, ?decision, scores = ?tally.table(), "face shape selected");
        }

        Ok(Analysis {
            shape,
            measurements,
            scores: tally.into_table(),
            decision,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn face(half_widths: [f64; 9], ys: [f64; 9], eye_span: f64, mouth_bottom: f64) -> LandmarkSet {
        let cx = 200.0;
        let mut jaw = vec![Point::new(0.0, 0.0); 17];
        for i in 0..9 {
            jaw[i] = Point::new(cx - half_widths[i], ys[i]);
            jaw[16 - i] = Point::new(cx + half_widths[i], ys[i]);
        }
        let eye = |x0: f64| -> Vec<Point> {
            [(0.0, 5.0), (10.0, 0.0), (20.0, 0.0), (30.0, 5.0), (20.0, 10.0), (10.0, 10.0)]
                .iter()
                .map(|(dx, dy)| Point::new(x0 + dx, 150.0 + dy))
                .collect()
        };
        LandmarkSet {
            jaw_outline: jaw,
            left_eye: eye(cx - eye_span / 2.0),
            right_eye: eye(cx + eye_span / 2.0 - 30.0),
            mouth: vec![
                Point::new(cx - 25.0, mouth_bottom - 8.0),
                Point::new(cx, mouth_bottom - 16.0),
                Point::new(cx + 25.0, mouth_bottom - 8.0),
                Point::new(cx, mouth_bottom),
            ],
            nose: vec![],
        }
    }

    fn oval() -> LandmarkSet {
        face(
            [75.0, 74.0, 71.0, 56.0, 49.0, 40.0, 29.0, 16.0, 0.0],
            [165.0, 190.0, 215.0, 240.0, 265.0, 290.0, 310.0, 325.0, 330.0],
            84.0,
            285.0,
        )
    }

    #[test]
    fn test_classify_oval() {
        let classifier = FaceShapeClassifier::default();
        let analysis = classifier.analyze(&oval()).unwrap();
        assert_eq!(analysis.shape, FaceShape::Oval);
        assert_eq!(analysis.decision, Decision::Scored);
        // stage B total plus the chin gate
        assert_eq!(analysis.scores.oval, 68);
    }

    #[test]
    fn test_classify_long() {
        let long = face(
            [68.0, 67.0, 65.0, 60.0, 53.0, 43.0, 31.0, 17.0, 0.0],
            [170.0, 200.0, 230.0, 260.0, 290.0, 315.0, 335.0, 350.0, 356.0],
            84.0,
            285.0,
        );
        assert_eq!(
            FaceShapeClassifier::default().classify(&long),
            Some(FaceShape::Long)
        );
    }

    #[test]
    fn test_heart_override_beats_round_proportions() {
        // wide, short face with a narrow jaw: forehead 160, jaw ~106.7
        let heart = face(
            [86.0, 86.0, 84.0, 160.0 / 3.0, 46.0, 38.0, 27.0, 14.0, 0.0],
            [165.0, 185.0, 205.0, 225.0, 245.0, 262.0, 276.0, 285.0, 288.0],
            100.0,
            255.0,
        );
        let analysis = FaceShapeClassifier::default().analyze(&heart).unwrap();
        assert!(analysis.measurements.width_to_height_ratio > 0.95);
        assert!((analysis.measurements.forehead_to_jaw_ratio - 1.5).abs() < 1e-9);
        assert_eq!(analysis.shape, FaceShape::Heart);
        assert_eq!(analysis.decision, Decision::HeartOverride);
        assert_eq!(analysis.scores, ScoreTable::definitive(FaceShape::Heart));
    }

    #[test]
    fn test_empty_jaw_is_no_result() {
        let mut set = oval();
        set.jaw_outline.clear();
        assert_eq!(FaceShapeClassifier::default().classify(&set), None);
    }

    #[test]
    fn test_missing_eyes_is_no_result() {
        let mut set = oval();
        set.right_eye.clear();
        let classifier = FaceShapeClassifier::default();
        assert_eq!(classifier.classify(&set), None);
        assert_eq!(
            classifier.analyze(&set).unwrap_err(),
            InvalidLandmarks::MissingGroup("right_eye")
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = FaceShapeClassifier::default();
        let set = oval();
        let first = classifier.analyze(&set).unwrap();
        for _ in 0..10 {
            let again = classifier.analyze(&set).unwrap();
            assert_eq!(again.shape, first.shape);
            assert_eq!(again.scores, first.scores);
            assert_eq!(again.measurements, first.measurements);
        }
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let set = oval();
        let traced = FaceShapeClassifier::new(ClassifierConfig::default().with_trace(true))
            .analyze(&set)
            .unwrap();
        let quiet = FaceShapeClassifier::new(ClassifierConfig::default().with_trace(false))
            .analyze(&set)
            .unwrap();
        assert_eq!(traced.shape, quiet.shape);
        assert_eq!(traced.scores, quiet.scores);
    }

    #[test]
    fn test_classify_from_threads() {
        let classifier = std::sync::Arc::new(FaceShapeClassifier::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = std::sync::Arc::clone(&classifier);
                std::thread::spawn(move || classifier.classify(&oval()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(FaceShape::Oval));
        }
    }
}
