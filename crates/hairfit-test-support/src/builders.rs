//! Synthetic landmark builders for testing.

use hairfit_adapters::LandmarkDocument;
use hairfit_core::{FaceShape, LandmarkSet, Point};

const CENTER_X: f64 = 200.0;
const EYE_TOP: f64 = 150.0;
const EYE_WIDTH: f64 = 30.0;
const EYE_HEIGHT: f64 = 10.0;
const MOUTH_HALF_WIDTH: f64 = 25.0;
const MOUTH_HALF_HEIGHT: f64 = 8.0;

/// Builder for synthetic, left-right symmetric faces.
///
/// The jaw is described by nine half-widths and heights, from the top of
/// the left jaw (landmark 0) down to the chin (landmark 8); landmarks 9-16
/// mirror them. Eyes are 6-point contours with their tops on one line and
/// the mouth is a 12-point ellipse.
#[derive(Debug, Clone)]
pub struct LandmarkSetBuilder {
    half_widths: [f64; 9],
    heights: [f64; 9],
    eye_span: f64,
    mouth_bottom: f64,
    offset: Point,
}

impl LandmarkSetBuilder {
    /// Creates a builder from raw jaw half-widths and heights.
    #[must_use]
    pub const fn new(half_widths: [f64; 9], heights: [f64; 9]) -> Self {
        Self {
            half_widths,
            heights,
            eye_span: 84.0,
            mouth_bottom: 285.0,
            offset: Point::new(0.0, 0.0),
        }
    }

    // === Presets, one per face shape ===

    /// Balanced proportions with a gently tapering jaw.
    #[must_use]
    pub const fn oval() -> Self {
        Self::new(
            [75.0, 74.0, 71.0, 56.0, 49.0, 40.0, 29.0, 16.0, 0.0],
            [165.0, 190.0, 215.0, 240.0, 265.0, 290.0, 310.0, 325.0, 330.0],
        )
    }

    /// Nearly as wide as tall with full cheeks and a short chin.
    #[must_use]
    pub const fn round() -> Self {
        Self::new(
            [86.0, 86.0, 84.0, 78.0, 70.0, 58.0, 42.0, 22.0, 0.0],
            [165.0, 185.0, 205.0, 225.0, 245.0, 262.0, 276.0, 285.0, 288.0],
        )
        .mouth_bottom(255.0)
    }

    /// Wide, straight jaw of similar width to the cheeks.
    #[must_use]
    pub const fn square() -> Self {
        Self::new(
            [80.0, 80.0, 77.0, 76.0, 74.0, 66.0, 50.0, 27.0, 0.0],
            [165.0, 185.0, 205.0, 235.0, 260.0, 282.0, 298.0, 306.0, 310.0],
        )
        .eye_span(100.0)
        .mouth_bottom(280.0)
    }

    /// Wide upper face narrowing sharply to the jaw.
    #[must_use]
    pub const fn heart() -> Self {
        Self::new(
            [78.0, 76.0, 70.0, 50.0, 42.0, 34.0, 24.0, 13.0, 0.0],
            [165.0, 185.0, 205.0, 230.0, 250.0, 270.0, 290.0, 305.0, 315.0],
        )
        .eye_span(96.0)
        .mouth_bottom(268.0)
    }

    /// Tall and narrow.
    #[must_use]
    pub const fn long() -> Self {
        Self::new(
            [68.0, 67.0, 65.0, 60.0, 53.0, 43.0, 31.0, 17.0, 0.0],
            [170.0, 200.0, 230.0, 260.0, 290.0, 315.0, 335.0, 350.0, 356.0],
        )
    }

    /// Cheekbones wider than both the forehead and the jaw.
    #[must_use]
    pub const fn diamond() -> Self {
        Self::new(
            [60.0, 72.0, 70.0, 50.0, 44.0, 36.0, 26.0, 14.0, 0.0],
            [165.0, 190.0, 215.0, 240.0, 265.0, 290.0, 310.0, 325.0, 332.0],
        )
        .eye_span(70.0)
    }

    /// Returns the preset that classifies as `shape` under the default
    /// classifier configuration.
    #[must_use]
    pub const fn preset(shape: FaceShape) -> Self {
        match shape {
            FaceShape::Oval => Self::oval(),
            FaceShape::Round => Self::round(),
            FaceShape::Square => Self::square(),
            FaceShape::Heart => Self::heart(),
            FaceShape::Long => Self::long(),
            FaceShape::Diamond => Self::diamond(),
        }
    }

    // === Knobs ===

    /// Sets the distance between the outer corners of the eyes.
    #[must_use]
    pub const fn eye_span(mut self, span: f64) -> Self {
        self.eye_span = span;
        self
    }

    /// Sets the lowest y coordinate of the mouth.
    #[must_use]
    pub const fn mouth_bottom(mut self, y: f64) -> Self {
        self.mouth_bottom = y;
        self
    }

    /// Shifts every landmark by `(dx, dy)`.
    #[must_use]
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Point::new(self.offset.x + dx, self.offset.y + dy);
        self
    }

    /// Builds the landmark set.
    #[must_use]
    pub fn build(&self) -> LandmarkSet {
        let cx = CENTER_X + self.offset.x;
        let dy = self.offset.y;

        let mut jaw = vec![Point::new(0.0, 0.0); 17];
        for (i, (hw, y)) in self.half_widths.iter().zip(self.heights).enumerate() {
            jaw[i] = Point::new(cx - hw, y + dy);
            jaw[16 - i] = Point::new(cx + hw, y + dy);
        }

        let eye = |x0: f64| -> Vec<Point> {
            let (w, h) = (EYE_WIDTH, EYE_HEIGHT);
            [
                (0.0, h / 2.0),
                (w / 3.0, 0.0),
                (2.0 * w / 3.0, 0.0),
                (w, h / 2.0),
                (2.0 * w / 3.0, h),
                (w / 3.0, h),
            ]
            .iter()
            .map(|(ex, ey)| Point::new(x0 + ex, EYE_TOP + dy + ey))
            .collect()
        };

        let mouth = (0..12_u8)
            .map(|k| {
                let angle = std::f64::consts::TAU * f64::from(k) / 12.0;
                Point::new(
                    MOUTH_HALF_WIDTH.mul_add(angle.cos(), cx),
                    MOUTH_HALF_HEIGHT.mul_add(angle.sin(), self.mouth_bottom - MOUTH_HALF_HEIGHT)
                        + dy,
                )
            })
            .collect();

        LandmarkSet {
            jaw_outline: jaw,
            left_eye: eye(cx - self.eye_span / 2.0),
            right_eye: eye(cx + self.eye_span / 2.0 - EYE_WIDTH),
            mouth,
            nose: Vec::new(),
        }
    }

    /// Builds a landmark document containing this single face.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_document_json(&self) -> anyhow::Result<String> {
        document_json(vec![self.build()])
    }
}

/// Serializes faces into a landmark document, in the given order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn document_json(faces: Vec<LandmarkSet>) -> anyhow::Result<String> {
    LandmarkDocument::from_faces(faces).to_json()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hairfit_core::FaceShapeClassifier;

    #[test]
    fn test_document_json_keeps_face_order() {
        let json = document_json(vec![
            LandmarkSetBuilder::heart().build(),
            LandmarkSetBuilder::oval().build(),
        ])
        .unwrap();
        let faces = LandmarkDocument::parse(&json)
            .unwrap()
            .into_landmark_sets()
            .unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0], LandmarkSetBuilder::heart().build());
    }

    #[test]
    fn test_presets_classify_as_named() {
        let classifier = FaceShapeClassifier::default();
        for shape in FaceShape::ALL {
            let face = LandmarkSetBuilder::preset(shape).build();
            assert_eq!(classifier.classify(&face), Some(shape), "{shape}");
        }
    }

    #[test]
    fn test_build_is_complete() {
        let face = LandmarkSetBuilder::oval().build();
        assert!(face.validate().is_ok());
        assert_eq!(face.jaw_outline.len(), 17);
        assert_eq!(face.mouth.len(), 12);
        assert_eq!(face.jaw_outline[8].x, 200.0);
    }

    #[test]
    fn test_translation_does_not_change_shape() {
        let classifier = FaceShapeClassifier::default();
        for shape in FaceShape::ALL {
            let face = LandmarkSetBuilder::preset(shape).translate(37.0, -12.0).build();
            assert_eq!(classifier.classify(&face), Some(shape), "{shape}");
        }
    }
}
