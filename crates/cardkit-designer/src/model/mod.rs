//! Scene object model: the drawable primitives of a canvas document.
//!
//! One file per object kind, wrapped by the [`ObjectKind`] enum and the
//! shared [`SceneObject`] carrier for the properties every kind has
//! (transform, fill, stroke, opacity, lock state).

mod circle;
mod group;
mod image;
mod line;
mod polygon;
mod rect;
mod text;
mod triangle;

pub use circle::CircleObject;
pub use group::GroupObject;
pub use image::ImageObject;
pub use line::LineObject;
pub use polygon::PolygonObject;
pub use rect::RectObject;
pub use text::{FontStyle, FontWeight, TextAlign, TextDecoration, TextObject};
pub use triangle::TriangleObject;

use cardkit_core::{Color, Fill, Stroke, Transform};
use serde::{Deserialize, Serialize};

/// Identifier of a scene object, unique within its owning document.
pub type ObjectId = u64;

/// Kind-specific payload of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectKind {
    Text(TextObject),
    Rect(RectObject),
    Circle(CircleObject),
    Triangle(TriangleObject),
    Polygon(PolygonObject),
    Line(LineObject),
    Image(ImageObject),
    Group(GroupObject),
}

impl ObjectKind {
    /// Display name of the kind, used as the default object name.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Text(_) => "Text",
            ObjectKind::Rect(_) => "Rectangle",
            ObjectKind::Circle(_) => "Circle",
            ObjectKind::Triangle(_) => "Triangle",
            ObjectKind::Polygon(_) => "Polygon",
            ObjectKind::Line(_) => "Line",
            ObjectKind::Image(_) => "Image",
            ObjectKind::Group(_) => "Group",
        }
    }

    /// Axis-aligned bounds in the object's local space, before its
    /// transform is applied. Used by the renderer and the fill resolver
    /// to size gradients to the object.
    pub fn local_bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            ObjectKind::Text(t) => t.local_bounds(),
            ObjectKind::Rect(r) => (0.0, 0.0, r.width, r.height),
            ObjectKind::Circle(c) => (-c.radius, -c.radius, c.radius, c.radius),
            ObjectKind::Triangle(t) => (0.0, 0.0, t.width, t.height),
            ObjectKind::Polygon(p) => p.local_bounds(),
            ObjectKind::Line(l) => l.local_bounds(),
            ObjectKind::Image(i) => (0.0, 0.0, i.natural_width, i.natural_height),
            // A group has no geometry of its own.
            ObjectKind::Group(_) => (0.0, 0.0, 0.0, 0.0),
        }
    }
}

/// One drawable object in a canvas document.
///
/// The z-order is implied by the object's position in the owning
/// document's sequence (front = end); it is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub stroke: Stroke,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub locked: bool,
    pub kind: ObjectKind,
}

fn default_opacity() -> f64 {
    1.0
}

impl SceneObject {
    /// Creates an object with the shared defaults applied.
    pub fn new(id: ObjectId, kind: ObjectKind, defaults: &ObjectDefaults) -> Self {
        Self {
            id,
            name: kind.name().to_string(),
            transform: Transform::default(),
            fill: defaults.fill.clone(),
            stroke: defaults.stroke.clone(),
            opacity: defaults.opacity,
            locked: false,
            kind,
        }
    }

    /// Sets opacity, clamped to [0, 1].
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

/// Default styling threaded through object construction.
///
/// This replaces any library-wide ambient default: callers own the value
/// and pass it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDefaults {
    pub fill: Fill,
    pub stroke: Stroke,
    pub opacity: f64,
    pub font_family: String,
    pub font_size: f64,
    pub text_color: Color,
}

impl Default for ObjectDefaults {
    fn default() -> Self {
        Self {
            fill: Fill::solid(Color::black()),
            stroke: Stroke::default(),
            opacity: 1.0,
            font_family: "Georgia".to_string(),
            font_size: 24.0,
            text_color: Color::black(),
        }
    }
}
