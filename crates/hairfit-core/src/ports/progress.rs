//! Progress reporting port for UI integration.

use crate::domain::ClassificationRecord;

/// Events emitted during a batch classification.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Classification started for an input.
    Started {
        /// Path to the input.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total inputs in batch, if known.
        total: Option<usize>,
    },
    /// Classification finished for an input, with or without a face shape.
    Completed {
        /// The classification record.
        record: ClassificationRecord,
    },
    /// An input was skipped because the provider failed on it.
    Skipped {
        /// Path to the input.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All inputs have been processed.
    Finished {
        /// Inputs that produced a record.
        processed: usize,
        /// Inputs skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
