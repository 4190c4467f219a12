use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanning `(0, 0)` to `(width, height)` in
/// local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectObject {
    pub width: f64,
    pub height: f64,
}

impl RectObject {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
