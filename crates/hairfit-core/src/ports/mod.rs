//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod landmark_provider;
mod progress;
mod result_output;

pub use landmark_provider::{first_face, LandmarkProvider};
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
