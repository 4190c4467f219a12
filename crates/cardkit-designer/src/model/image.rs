use serde::{Deserialize, Serialize};

/// A placed raster image. The source is an opaque reference (typically a
/// data URI); the engine never interprets it beyond rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    pub source: String,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ImageObject {
    pub fn new(source: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            source: source.into(),
            natural_width,
            natural_height,
        }
    }

    /// Uniform scale that fits the natural size inside a square box of
    /// the given side, never upscaling.
    pub fn fit_scale(&self, box_side: f64) -> f64 {
        let longest = self.natural_width.max(self.natural_height);
        if longest <= box_side || longest <= 0.0 {
            1.0
        } else {
            box_side / longest
        }
    }
}
