//! Test support utilities for hairfit.
//!
//! Provides mocks, synthetic landmark builders, and utilities for testing
//! the hairfit classification pipeline.
//!
//! # Example
//!
//! ```
//! use hairfit_core::{FaceShape, FaceShapeClassifier};
//! use hairfit_test_support::{LandmarkSetBuilder, MockLandmarkProvider};
//!
//! // Create a synthetic face
//! let face = LandmarkSetBuilder::heart().build();
//! assert_eq!(
//!     FaceShapeClassifier::default().classify(&face),
//!     Some(FaceShape::Heart)
//! );
//!
//! // Serve it from a mock landmark provider
//! let provider = MockLandmarkProvider::new().with_faces("heart.json", vec![face]);
//! ```

mod builders;
mod mocks;

pub use builders::{document_json, LandmarkSetBuilder};
pub use mocks::{MockLandmarkProvider, MockProgressSink, MockResultOutput};
