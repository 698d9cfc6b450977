//! Reasons a landmark set cannot be classified.

use thiserror::Error;

/// Structurally incomplete or geometrically degenerate landmarks.
///
/// Always recovered by the classifier as "no result".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidLandmarks {
    #[error("landmark group `{0}` is missing or empty")]
    MissingGroup(&'static str),

    #[error("jaw outline has {0} points, at least 17 are required")]
    TooFewJawPoints(usize),

    #[error("landmark coordinates must be finite")]
    NonFinite,

    #[error("expected {expected} landmark points, got {actual}")]
    WrongPointCount { expected: usize, actual: usize },

    #[error("{measurement} must be positive, got {value}")]
    NonPositive {
        measurement: &'static str,
        value: f64,
    },

    #[error("jaw angle is undefined: chin coincides with a jaw corner")]
    DegenerateAngle,
}
