use serde::{Deserialize, Serialize};

/// An isosceles triangle filling the local box `(0, 0)`–`(width, height)`,
/// apex at the top center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleObject {
    pub width: f64,
    pub height: f64,
}

impl TriangleObject {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
