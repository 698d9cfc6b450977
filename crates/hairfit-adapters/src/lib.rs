//! Hairfit Adapters - External adapters for hairfit.
//!
//! This crate provides adapters for:
//! - Filesystem landmark document source
//! - JSON landmark document codec
//! - Landmark detector capability with explicit loading

pub mod detector;
pub mod document;
pub mod fs;
pub mod provider;

pub use detector::{Detector, DetectorLoader, DocumentLoader, DEFAULT_LOAD_ATTEMPTS};
pub use document::{FaceEntry, LandmarkDocument};
pub use fs::FsLandmarkSource;
pub use provider::JsonLandmarkProvider;
