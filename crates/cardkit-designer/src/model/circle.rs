use serde::{Deserialize, Serialize};

/// A circle centered on the local origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleObject {
    pub radius: f64,
}

impl CircleObject {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}
