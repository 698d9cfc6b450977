//! Geometric measurements derived from the landmarks.

use serde::{Deserialize, Serialize};

use super::ClassifierConfig;
use crate::domain::{InvalidLandmarks, LandmarkSet, Point};

/// Jaw outline indices used by the measurements.
mod jaw {
    pub const CHEEK_LEFT: usize = 1;
    pub const MID_CHEEK_LEFT: usize = 2;
    pub const CORNER_LEFT: usize = 3;
    pub const CHIN: usize = 8;
    pub const CORNER_RIGHT: usize = 13;
    pub const MID_CHEEK_RIGHT: usize = 14;
    pub const CHEEK_RIGHT: usize = 15;
}

/// Scalar quantities computed once per classification.
///
/// Lengths are in landmark coordinate units, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub face_width_at_cheeks: f64,
    pub face_center_x: f64,
    pub cheek_fullness: f64,
    pub face_width: f64,
    pub forehead_top: f64,
    pub face_height: f64,
    pub face_circularity: f64,
    pub roundness_coefficient: f64,
    pub cheek_curvature: f64,
    pub chin_length: f64,
    pub chin_ratio: f64,
    pub jaw_width: f64,
    pub eye_width: f64,
    pub forehead_width: f64,
    pub upper_face_width: f64,
    pub jaw_angle: f64,
    pub jaw_roundness: f64,
    pub width_to_height_ratio: f64,
    pub jaw_to_forehead_ratio: f64,
    pub forehead_to_jaw_ratio: f64,
    pub upper_to_lower_face_width_ratio: f64,
    pub top_third_width: f64,
    pub mid_third_width: f64,
    pub bottom_third_width: f64,
    pub chin_pointedness: f64,
    pub face_tapering: f64,
}

impl Measurements {
    /// Derives all measurements from a validated landmark set.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLandmarks`] when the geometry is degenerate: a
    /// width or height that is not positive, or a chin that coincides with
    /// a jaw corner.
    pub fn derive(
        landmarks: &LandmarkSet,
        config: &ClassifierConfig,
    ) -> Result<Self, InvalidLandmarks> {
        landmarks.validate()?;
        let j = &landmarks.jaw_outline;

        let face_width_at_cheeks = positive(
            "face_width_at_cheeks",
            j[jaw::CHEEK_RIGHT].x - j[jaw::CHEEK_LEFT].x,
        )?;
        let face_center_x = (j[jaw::CHEEK_LEFT].x + j[jaw::CHEEK_RIGHT].x) / 2.0;

        let left_reach = positive(
            "left_cheek_reach",
            face_center_x - j[jaw::MID_CHEEK_LEFT].x,
        )?;
        let right_reach = positive(
            "right_cheek_reach",
            j[jaw::MID_CHEEK_RIGHT].x - face_center_x,
        )?;
        let cheek_fullness = (left_reach + right_reach) / 2.0 / face_width_at_cheeks;

        let (min_x, max_x) = x_extent(j);
        let face_width = positive("face_width", max_x - min_x)?;

        let eye_top = landmarks
            .eye_points()
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min);
        let forehead_top = eye_top - config.forehead_offset;
        let face_height = positive("face_height", j[jaw::CHIN].y - forehead_top)?;

        let face_circularity = face_width.min(face_height) / face_width.max(face_height);
        let aspect_gap = (face_width - face_height).abs();
        let roundness_coefficient = if aspect_gap < 0.1 * face_width {
            2.0
        } else {
            1.0 - aspect_gap / face_width
        };

        let cheek_curvature = ((j[jaw::MID_CHEEK_LEFT].y - j[jaw::CORNER_LEFT].y).abs()
            / left_reach
            + (j[jaw::MID_CHEEK_RIGHT].y - j[jaw::CORNER_RIGHT].y).abs() / right_reach)
            / 2.0;

        let mouth_bottom = landmarks
            .mouth
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        let chin_length = j[jaw::CHIN].y - mouth_bottom;
        let chin_ratio = chin_length / face_height;

        let jaw_width = positive("jaw_width", j[jaw::CORNER_RIGHT].x - j[jaw::CORNER_LEFT].x)?;

        let (eye_min_x, eye_max_x) = x_extent_iter(landmarks.eye_points());
        let eye_width = eye_max_x - eye_min_x;
        let forehead_width = (eye_width * config.forehead_eye_factor)
            .max(face_width * config.forehead_face_factor);
        let forehead_width = positive("forehead_width", forehead_width)?;
        let upper_face_width = forehead_width.max(face_width * config.upper_face_factor);

        let jaw_angle = angle_at(j[jaw::CHIN], j[jaw::CORNER_LEFT], j[jaw::CORNER_RIGHT])?;
        let jaw_to_forehead_ratio = jaw_width / forehead_width;

        Ok(Self {
            face_width_at_cheeks,
            face_center_x,
            cheek_fullness,
            face_width,
            forehead_top,
            face_height,
            face_circularity,
            roundness_coefficient,
            cheek_curvature,
            chin_length,
            chin_ratio,
            jaw_width,
            eye_width,
            forehead_width,
            upper_face_width,
            jaw_angle,
            jaw_roundness: 180.0 - jaw_angle,
            width_to_height_ratio: face_width / face_height,
            jaw_to_forehead_ratio,
            forehead_to_jaw_ratio: 1.0 / jaw_to_forehead_ratio,
            upper_to_lower_face_width_ratio: upper_face_width / jaw_width,
            top_third_width: forehead_width,
            mid_third_width: face_width_at_cheeks,
            bottom_third_width: jaw_width,
            chin_pointedness: jaw_angle,
            face_tapering: (forehead_width - jaw_width) / forehead_width,
        })
    }
}

fn positive(measurement: &'static str, value: f64) -> Result<f64, InvalidLandmarks> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidLandmarks::NonPositive { measurement, value })
    }
}

fn x_extent(points: &[Point]) -> (f64, f64) {
    x_extent_iter(points.iter())
}

fn x_extent_iter<'a>(points: impl Iterator<Item = &'a Point>) -> (f64, f64) {
    points.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.x), hi.max(p.x))
    })
}

/// Interior angle in degrees at `vertex` between the rays to `a` and `b`.
fn angle_at(vertex: Point, a: Point, b: Point) -> Result<f64, InvalidLandmarks> {
    let (ax, ay) = (a.x - vertex.x, a.y - vertex.y);
    let (bx, by) = (b.x - vertex.x, b.y - vertex.y);
    let norms = ax.hypot(ay) * bx.hypot(by);
    if norms <= 0.0 {
        return Err(InvalidLandmarks::DegenerateAngle);
    }
    let cos = ((ax * bx + ay * by) / norms).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}
