//! Facial landmark types consumed by the classifier.

use serde::{Deserialize, Serialize};

use super::InvalidLandmarks;

/// Number of points in a jaw outline.
pub const JAW_POINTS: usize = 17;

/// Number of points in the iBUG 68-point annotation layout.
pub const IBUG_68_POINTS: usize = 68;

/// A 2D landmark coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Landmark groups of a single detected face.
///
/// Missing groups deserialize as empty, so incomplete detector output is
/// rejected by [`LandmarkSet::validate`] rather than by the decoder.
/// Unknown keys are a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandmarkSet {
    /// Jaw contour, index 0 next to the left ear, 8 at the chin, 16 next
    /// to the right ear.
    pub jaw_outline: Vec<Point>,
    /// Left eye contour (6 points).
    pub left_eye: Vec<Point>,
    /// Right eye contour (6 points).
    pub right_eye: Vec<Point>,
    /// Outer mouth contour.
    pub mouth: Vec<Point>,
    /// Nose bridge and base. Not used by any measurement.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nose: Vec<Point>,
}

impl LandmarkSet {
    /// Splits a flat iBUG 68-point annotation into landmark groups.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLandmarks::WrongPointCount`] unless exactly 68
    /// points are given.
    pub fn from_68_points(points: &[Point]) -> Result<Self, InvalidLandmarks> {
        if points.len() != IBUG_68_POINTS {
            return Err(InvalidLandmarks::WrongPointCount {
                expected: IBUG_68_POINTS,
                actual: points.len(),
            });
        }

        Ok(Self {
            jaw_outline: points[0..=16].to_vec(),
            nose: points[27..=35].to_vec(),
            left_eye: points[36..=41].to_vec(),
            right_eye: points[42..=47].to_vec(),
            mouth: points[48..=59].to_vec(),
        })
    }

    /// Checks structural completeness before any measurement is taken.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found.
    pub fn validate(&self) -> Result<(), InvalidLandmarks> {
        if self.jaw_outline.is_empty() {
            return Err(InvalidLandmarks::MissingGroup("jaw_outline"));
        }
        if self.left_eye.is_empty() {
            return Err(InvalidLandmarks::MissingGroup("left_eye"));
        }
        if self.right_eye.is_empty() {
            return Err(InvalidLandmarks::MissingGroup("right_eye"));
        }
        if self.mouth.is_empty() {
            return Err(InvalidLandmarks::MissingGroup("mouth"));
        }
        if self.jaw_outline.len() < JAW_POINTS {
            return Err(InvalidLandmarks::TooFewJawPoints(self.jaw_outline.len()));
        }

        let all_finite = self
            .jaw_outline
            .iter()
            .chain(&self.left_eye)
            .chain(&self.right_eye)
            .chain(&self.mouth)
            .all(Point::is_finite);
        if !all_finite {
            return Err(InvalidLandmarks::NonFinite);
        }

        Ok(())
    }

    /// Iterates over the points of both eyes.
    pub fn eye_points(&self) -> impl Iterator<Item = &Point> {
        self.left_eye.iter().chain(&self.right_eye)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn indexed_points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_from_68_points_partitions_groups() {
        let set = LandmarkSet::from_68_points(&indexed_points(68)).unwrap();

        assert_eq!(set.jaw_outline.len(), 17);
        assert_eq!(set.nose.len(), 9);
        assert_eq!(set.left_eye.len(), 6);
        assert_eq!(set.right_eye.len(), 6);
        assert_eq!(set.mouth.len(), 12);

        assert_eq!(set.jaw_outline[8].x, 8.0);
        assert_eq!(set.left_eye[0].x, 36.0);
        assert_eq!(set.right_eye[0].x, 42.0);
        assert_eq!(set.mouth[0].x, 48.0);
        assert_eq!(set.mouth[11].x, 59.0);
    }

    #[test]
    fn test_from_68_points_rejects_other_layouts() {
        let err = LandmarkSet::from_68_points(&indexed_points(81)).unwrap_err();
        assert_eq!(
            err,
            InvalidLandmarks::WrongPointCount {
                expected: 68,
                actual: 81
            }
        );
    }

    #[test]
    fn test_validate_reports_missing_groups() {
        let mut set = LandmarkSet::from_68_points(&indexed_points(68)).unwrap();
        assert!(set.validate().is_ok());

        set.mouth.clear();
        assert_eq!(
            set.validate().unwrap_err(),
            InvalidLandmarks::MissingGroup("mouth")
        );

        assert_eq!(
            LandmarkSet::default().validate().unwrap_err(),
            InvalidLandmarks::MissingGroup("jaw_outline")
        );
    }

    #[test]
    fn test_validate_short_jaw() {
        let mut set = LandmarkSet::from_68_points(&indexed_points(68)).unwrap();
        set.jaw_outline.truncate(16);
        assert_eq!(
            set.validate().unwrap_err(),
            InvalidLandmarks::TooFewJawPoints(16)
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let mut set = LandmarkSet::from_68_points(&indexed_points(68)).unwrap();
        set.left_eye[2].y = f64::NAN;
        assert_eq!(set.validate().unwrap_err(), InvalidLandmarks::NonFinite);
    }

    #[test]
    fn test_missing_groups_deserialize_empty() {
        let set: LandmarkSet =
            serde_json::from_str(r#"{"jaw_outline":[{"x":1.0,"y":2.0}]}"#).unwrap();
        assert_eq!(set.jaw_outline.len(), 1);
        assert!(set.left_eye.is_empty());
        assert!(set.nose.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_unknown_group() {
        let err = serde_json::from_str::<LandmarkSet>(r#"{"eyebrows":[]}"#).unwrap_err();
        assert!(err.to_string().contains("eyebrows"));
    }
}
