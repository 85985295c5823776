//! Object Detection Seam
//!
//! Types produced by the object detector and the trait the decision core
//! consumes them through:
//! - Per-frame prediction batches (class label + bounding box)
//! - The `ObjectDetector` capability trait
//! - A scripted stub backend for development and tests
//!
//! Model choice, inference latency, and accuracy are the backend's concern;
//! nothing in this crate runs a model.

pub mod detector;
pub mod frame;
pub mod prediction;

pub use detector::{ObjectDetector, StubDetector};
pub use frame::VideoFrame;
pub use prediction::{BoundingBox, Prediction, PERSON_CLASS};

use thiserror::Error;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Frame rejected: {0}")]
    BadFrame(String),
}
