//! Detection result types

use serde::{Deserialize, Serialize};

/// Class label the presence logic keys on.
pub const PERSON_CLASS: &str = "person";

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Single detection from one frame. Ephemeral: batches are consumed by the
/// decision core and never retained beyond aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Class label (detector vocabulary, e.g. "person", "cup")
    pub class: String,

    /// Bounding box of the detection
    pub bbox: BoundingBox,

    /// Detection confidence
    pub confidence: f32,
}

impl Prediction {
    pub fn new(class: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            class: class.into(),
            bbox,
            confidence,
        }
    }

    /// Whether this detection feeds the presence tracker rather than the
    /// item aggregation path.
    pub fn is_person(&self) -> bool {
        self.class == PERSON_CLASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_classification() {
        let bbox = BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 20.0,
        };
        assert!(Prediction::new("person", bbox, 0.9).is_person());
        assert!(!Prediction::new("cup", bbox, 0.9).is_person());
    }

    #[test]
    fn test_bbox_area() {
        let bbox = BoundingBox {
            x: 5.0,
            y: 5.0,
            width: 10.0,
            height: 20.0,
        };
        assert_eq!(bbox.area(), 200.0);
    }
}
