//! Core domain types for face-shape classification.

mod error;
mod face_shape;
mod landmarks;
mod result;

pub use error::InvalidLandmarks;
pub use face_shape::{FaceShape, UnknownFaceShape};
pub use landmarks::{LandmarkSet, Point, IBUG_68_POINTS, JAW_POINTS};
pub use result::{ClassificationRecord, Explanation, RecordStatus};
