//! Hairfit Core - Face-shape classification and hairstyle recommendation
//!
//! This crate contains the landmark domain types, the rule-based face-shape
//! classifier, the static hairstyle catalog, and the ports through which
//! adapters supply landmarks and receive results.

pub mod catalog;
pub mod classifier;
pub mod domain;
pub mod pipeline;
pub mod ports;

pub use catalog::{hairstyle, hairstyles, recommend, Hairstyle};
pub use classifier::{
    Analysis, ClassifierConfig, Decision, FaceShapeClassifier, Measurements, ScoreTable,
};
pub use domain::{
    ClassificationRecord, Explanation, FaceShape, InvalidLandmarks, LandmarkSet, Point,
    RecordStatus,
};
pub use pipeline::{classify_image, ClassifyOptions};
pub use ports::{first_face, LandmarkProvider, ProgressEvent, ProgressSink, ResultOutput};
