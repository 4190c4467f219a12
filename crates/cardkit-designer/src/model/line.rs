use serde::{Deserialize, Serialize};

use cardkit_core::Point;

/// A straight segment between two local-space endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub start: Point,
    pub end: Point,
}

impl LineObject {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn local_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }
}
