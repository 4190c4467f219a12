//! # CardKit Core
//!
//! Core value types for the CardKit design-canvas engine: geometry and
//! transform types, colors, fills and gradients, and the engine-wide
//! constants shared by the designer and project crates.

pub mod constants;
pub mod error;
pub mod fill;
pub mod geometry;

pub use error::{StyleError, StyleResult};
pub use fill::{
    Color, Fill, Gradient, GradientDirection, GradientKind, GradientPreset, GradientStop, Stroke,
};
pub use geometry::{Point, Transform};
