//! Detector capability trait and stub backend

use std::collections::VecDeque;

use crate::frame::VideoFrame;
use crate::prediction::Prediction;
use crate::DetectorError;

/// Opaque detector capability: given a frame, return a batch of predictions.
///
/// The decision core does not retry failed calls; retry policy belongs to
/// whoever drives the frame loop.
pub trait ObjectDetector: Send {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Detect objects in one frame
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<Prediction>, DetectorError>;
}

/// Stub backend replaying a scripted sequence of prediction batches.
///
/// Returns batches in order, then empty batches once the script is
/// exhausted. Used for development and tests.
pub struct StubDetector {
    script: VecDeque<Vec<Prediction>>,
}

impl StubDetector {
    pub fn new(script: Vec<Vec<Prediction>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Stub that never detects anything
    pub fn empty() -> Self {
        Self {
            script: VecDeque::new(),
        }
    }
}

impl Default for StubDetector {
    fn default() -> Self {
        Self::empty()
    }
}

impl ObjectDetector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<Prediction>, DetectorError> {
        Ok(self.script.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::BoundingBox;

    fn cup() -> Prediction {
        Prediction::new(
            "cup",
            BoundingBox {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: 60.0,
            },
            0.88,
        )
    }

    #[test]
    fn test_stub_replays_script_then_empties() {
        let mut detector = StubDetector::new(vec![vec![cup()], vec![]]);
        let frame = VideoFrame::blank(4, 4, 0);

        assert_eq!(detector.detect(&frame).unwrap().len(), 1);
        assert!(detector.detect(&frame).unwrap().is_empty());
        // Script exhausted: every further frame is an empty batch
        assert!(detector.detect(&frame).unwrap().is_empty());
    }
}
