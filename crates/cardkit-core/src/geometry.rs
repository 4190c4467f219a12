//! Geometry primitives shared across the engine.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SCALE;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of an object's origin plus independent scale factors and a
/// rotation about the object's own origin.
///
/// Scale factors may be negative (mirroring) but never zero: mutators
/// clamp the magnitude to [`MIN_SCALE`] so the bounding box stays
/// invertible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle_degrees: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle_degrees: 0.0,
        }
    }
}

impl Transform {
    /// Creates a transform at a position with unit scale and no rotation.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Moves the origin by a delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Sets the scale factors, clamping each magnitude to [`MIN_SCALE`]
    /// while preserving sign.
    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale_x = clamp_scale(sx);
        self.scale_y = clamp_scale(sy);
    }

    /// Multiplies the current scale by the given factors, with the same
    /// clamping as [`Transform::set_scale`].
    pub fn scale_by(&mut self, sx: f64, sy: f64) {
        self.set_scale(self.scale_x * sx, self.scale_y * sy);
    }

    /// Returns a copy offset by a delta, leaving scale and angle intact.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Clamps a scale factor away from zero, preserving sign. Non-finite
/// input collapses to the minimum scale.
pub fn clamp_scale(s: f64) -> f64 {
    if !s.is_finite() {
        return MIN_SCALE;
    }
    if s.abs() < MIN_SCALE {
        if s.is_sign_negative() {
            -MIN_SCALE
        } else {
            MIN_SCALE
        }
    } else {
        s
    }
}
